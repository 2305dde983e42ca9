mod resource;

use crate::resource::Resource;
use anyhow::bail;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser as _, ValueEnum as _};
use fate::{Fate, FnFate, Guard as _, make_fate};
use std::{
    cell::RefCell,
    env, fs, process,
    rc::{Rc, Weak},
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser)]
struct Args {
    /// Scenario to run. May be repeated; runs every scenario when omitted.
    #[arg(long = "scenario", value_enum)]
    scenarios: Vec<Scenario>,
    /// Let the temp-file and resource scenarios finish instead of failing
    /// halfway through.
    #[arg(long)]
    succeed: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum Scenario {
    Reentrant,
    FnPointer,
    Sizes,
    TempFile,
    Resource,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let scenarios = if args.scenarios.is_empty() {
        Scenario::value_variants().to_vec()
    } else {
        args.scenarios
    };

    for scenario in scenarios {
        info!(?scenario, "running");
        let result = match scenario {
            Scenario::Reentrant => {
                reentrant();
                Ok(())
            }
            Scenario::FnPointer => {
                fn_pointer();
                Ok(())
            }
            Scenario::Sizes => {
                sizes();
                Ok(())
            }
            Scenario::TempFile => temp_file(args.succeed),
            Scenario::Resource => resource(args.succeed),
        };
        // Failures here are part of the demonstration: the guards have
        // already run by the time the error reaches us.
        if let Err(err) = result {
            error!(?scenario, "{err:#}");
        }
    }

    Ok(())
}

/// A closure that triggers the fate it is stored in.
fn reentrant() {
    let fate = Rc::<Fate<Box<dyn FnOnce()>>>::new_cyclic(|this| {
        let this = Weak::clone(this);
        let call: Box<dyn FnOnce()> = Box::new(move || {
            info!("fate breaker");
            if let Some(this) = this.upgrade() {
                this.trigger();
            }
        });
        Fate::new(call)
    });
    fate.trigger();
    info!(occupied = fate.is_occupied(), "after trigger");
}

thread_local! {
    static SELF_TRIGGERING: RefCell<Weak<FnFate>> = const { RefCell::new(Weak::new()) };
}

fn self_triggering() {
    info!("fn fate breaker");
    if let Some(fate) = SELF_TRIGGERING.with_borrow(Weak::upgrade) {
        fate.trigger();
    }
}

/// Same as [`reentrant`], with a plain function reaching its fate through a
/// thread-local.
fn fn_pointer() {
    let fate = Rc::new(FnFate::new(self_triggering));
    SELF_TRIGGERING.set(Rc::downgrade(&fate));
    fate.trigger();
    info!(occupied = fate.is_occupied(), "after trigger");
}

fn hello() {
    info!("hello from a deferred fn");
}

fn sizes() {
    let item = make_fate(hello);
    info!(bytes = size_of_val(&item), "fate around a fn item");

    let pointer = FnFate::new(hello);
    info!(bytes = size_of_val(&pointer), "fn fate");

    let values = vec![0.0_f64; 16];
    let closure = make_fate(move || info!(len = values.len(), "closure owning a vec"));
    info!(bytes = size_of_val(&closure), "fate around a closure");

    let moved = closure.transfer();
    info!(
        source = closure.is_occupied(),
        destination = moved.is_occupied(),
        "after transfer"
    );
}

fn temp_file(succeed: bool) -> anyhow::Result<()> {
    let dir = Utf8PathBuf::try_from(env::temp_dir())?;
    let path = dir.join(format!("fate-demo-{}.txt", process::id()));
    let result = write_scratch(&path, succeed);
    info!(%path, exists = path.exists(), "after scope");
    result
}

fn write_scratch(path: &Utf8Path, succeed: bool) -> anyhow::Result<()> {
    fs::write(path, "scratch")?;
    let _cleanup = make_fate(|| match fs::remove_file(path) {
        Ok(()) => info!(%path, "scratch file removed by fate"),
        Err(err) => warn!(%path, %err, "failed to remove scratch file"),
    });

    let contents = fs::read_to_string(path)?;
    if !succeed {
        bail!("something bad after reading {} bytes", contents.len());
    }
    Ok(())
}

fn resource(succeed: bool) -> anyhow::Result<()> {
    let resource = Resource::default();
    let result = locked_mutation(&resource, succeed);
    info!(
        locked = resource.is_locked(),
        mutations = resource.mutations(),
        "after scope"
    );
    result
}

fn locked_mutation(resource: &Resource, succeed: bool) -> anyhow::Result<()> {
    resource.lock()?;
    let _unlocker = make_fate(|| {
        resource.unlock();
        info!("resource unlocked by fate");
    });

    resource.mutate_something()?;
    if !succeed {
        bail!("something bad");
    }
    resource.mutate_something()?;
    Ok(())
}
