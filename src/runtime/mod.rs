pub mod migrate;
pub mod scaffold;
pub mod server;
pub mod shutdown;
pub mod startup;

pub use migrate::run_migrate;
pub use scaffold::make_script;
pub use server::{build_server, configure_routes};
pub use shutdown::{listen_for_shutdown, release_database};
pub use startup::{StartupContext, prepare_server};
