mod api;
mod boot;
mod chart;
mod components;
mod money;
mod participant;
mod settings;
mod split;

fn main() {
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    wasm_logger::init(wasm_logger::Config::new(level));
    boot::mount_all();
}
