//! quikcli demo — a banner followed by a simulated loading bar.

use std::thread;
use std::time::Duration;

use anyhow::Result;
use quikcli::{Cli, Display, Loader, Slot, cli::write_error};

const BANNER: [&str; 6] = [
    r"  ____        _ _     _____ _ _ ",
    r" / __ \      (_) |   / ____| (_)",
    r"| |  | |_   _ _| | _| |    | |_ ",
    r"| |  | | | | | | |/ / |    | | |",
    r"| |__| | |_| | |   <| |____| | |",
    r" \___\_\\__,_|_|_|\_\\_____|_|_|",
];

fn main() -> Result<()> {
    env_logger::init();

    let steps = Slot::with_default(100u32);
    let delay = Slot::with_default(50u64);

    let mut cli = Cli::new("quikcli", "0.0.1")?;
    cli.add_typed_flag("steps", "Number of loader steps", steps.clone())?
        .set_alias('s')?;
    cli.add_typed_flag("delay", "Milliseconds between steps", delay.clone())?
        .set_alias('d')?;
    cli.add_flag("quiet", "Skip the banner")?.set_alias('q')?;

    if let Err(err) = cli.parse_env() {
        write_error(&err, None);
        std::process::exit(2);
    }
    if !cli.is_active() {
        return Ok(());
    }

    let steps = steps.get().unwrap_or(100).max(1);
    let delay = Duration::from_millis(delay.get().unwrap_or(50));

    if !cli.flags().is_set("quiet") {
        cli.push_component(Display::new(BANNER));
    }
    cli.push_component(Loader::spawn(move |handle| {
        for step in 1..=steps {
            if handle.is_cancelled() {
                return;
            }
            handle.update(f64::from(step) / f64::from(steps));
            thread::sleep(delay);
        }
    }));
    cli.run()?;
    Ok(())
}
