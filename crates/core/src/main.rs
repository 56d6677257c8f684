//! Demo binary: wires a no-op collaborator set (or, on Windows, the real
//! Win32 bridge) into a `CoreContext` and drives a couple of `on_snapshot`
//! ticks, mirroring the teacher's `main.rs` startup-logging style on a much
//! smaller surface.

use tiling_core::collaborators::{Collaborators, ScreenId};
use tiling_core::commands::Command;
use tiling_core::config::{ConfigLoader, CoreConfig};
use tiling_core::context::CoreContext;
use tiling_core::geometry::Rect;
use tiling_core::navigation::Direction;
use tiling_core::workspace::WorkspaceId;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_logging();

    info!("tiling-core-demo starting");

    let config = load_config()?;
    info!(layout = ?config.layout, "configuration loaded");

    #[cfg(target_os = "windows")]
    let collaborators = Collaborators {
        platform: Box::new(tiling_core::platform::win32::Win32PlatformBridge),
        cursor: Box::new(tiling_core::platform::win32::Win32Cursor),
        rules: Box::new(tiling_core::collaborators::null::NullRulesEngine),
        borders: Box::new(tiling_core::collaborators::null::NullBorderOverlay),
        notifications: Box::new(tiling_core::collaborators::null::NullNotificationHub),
        sentinel: Box::new(tiling_core::collaborators::null::AlwaysReady),
    };
    #[cfg(not(target_os = "windows"))]
    let collaborators = Collaborators::null();

    let screen = ScreenId(0);
    let workspace_id = WorkspaceId(0);
    let mut ctx = CoreContext::new(collaborators, config, workspace_id);
    ctx.assign_screen(screen, workspace_id, Rect::new(0, 0, 1920, 1080));

    ctx.on_snapshot(screen)?;
    info!(windows = ctx.windows_on_workspace(workspace_id).len(), "first tick complete");

    if let Err(e) = ctx.execute(Command::FocusDirection(Direction::Right)) {
        info!(%e, "no-op demo command did not apply");
    }

    ctx.on_snapshot(screen)?;
    info!("tiling-core-demo exiting");
    Ok(())
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter("tiling_core=debug,info")
        .with_target(false)
        .init();
}

fn load_config() -> anyhow::Result<CoreConfig> {
    match std::env::var("TILING_CORE_CONFIG") {
        Ok(path) => ConfigLoader::load_file(std::path::Path::new(&path)),
        Err(_) => Ok(CoreConfig::default()),
    }
}
