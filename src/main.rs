mod animal;
mod app;
mod collision;
mod config;
mod daynight;
mod ecs;
mod events;
mod farm;
mod input;
mod pickups;
mod portals;
mod session;
mod timers;
mod util;

fn main() {
    env_logger::init();
    log::info!("Farmwalk starting up");

    if let Err(e) = app::run() {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
