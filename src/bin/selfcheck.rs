// Attest demonstration runner: registers the harness's own example suites
// and hands control to the shared CLI front-end.
// Usage: cargo run --bin selfcheck -- run [suites-dir]

use std::cell::Cell;
use std::process;
use std::rc::Rc;

use attest::registry::SuiteRegistry;
use attest::suite::{Suite, SuiteFailure};
use attest::HarnessError;

fn main() {
    let registry = match build_registry() {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            process::exit(1);
        }
    };
    process::exit(attest::cli::run(&registry));
}

fn build_registry() -> Result<SuiteRegistry, HarnessError> {
    let mut registry = SuiteRegistry::new();

    registry.register(Suite::new("smoke", |ctx| {
        ctx.t.ok();
        Ok(())
    }))?;

    // before sets a flag, the test asserts it, after clears it.
    let ready = Rc::new(Cell::new(false));
    let set = ready.clone();
    let check = ready.clone();
    let clear = ready;
    registry.register(
        Suite::new("lifecycle", move |ctx| {
            if check.get() {
                ctx.t.ok();
                Ok(())
            } else {
                Err(SuiteFailure::new("before hook did not run"))
            }
        })
        .before(move || {
            set.set(true);
            Ok(())
        })
        .after(move || {
            clear.set(false);
            Ok(())
        }),
    )?;

    // Deliberately failing suite; not listed in the default manifest.
    registry.register(Suite::new("exploding", |_ctx| {
        Err(SuiteFailure::new("boom"))
    }))?;

    registry.register(Suite::new("toolbox", |ctx| {
        ctx.u.insert("attempts", 3usize);
        match ctx.u.get::<usize>("attempts") {
            Some(&3) => {
                ctx.t.ok();
                Ok(())
            }
            other => Err(SuiteFailure::mismatch(
                "toolbox readback",
                "Some(3)",
                format!("{:?}", other),
            )),
        }
    }))?;

    Ok(registry)
}
