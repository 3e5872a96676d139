pub mod logging;
pub mod timezone;

pub use logging::init_tracing;
pub use timezone::Timezone;
