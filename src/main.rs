mod controller;
mod events;
mod save;
mod state;
mod ui;
mod widgets;

use druid::{AppLauncher, WindowDesc};
use std::path::PathBuf;
use uuid_file_namer::logging;

use crate::state::AppState;

pub fn main() -> anyhow::Result<()> {
    logging::init();

    let mut initial_state = AppState::new();
    // アイコンへドロップされたファイルは起動引数で渡される
    let dropped: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    if !dropped.is_empty() {
        save::add_paths(&mut initial_state, &dropped);
    }

    let main_window = WindowDesc::new(ui::build_ui())
        .title("UUID File Name Generator")
        .window_size((600.0, 640.0));
    AppLauncher::with_window(main_window)
        .launch(initial_state)
        .map_err(|err| anyhow::anyhow!("failed to launch application: {err}"))?;
    Ok(())
}
