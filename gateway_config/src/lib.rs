pub mod config;
pub mod env;
pub mod parser;

pub use config::{GatewayConfig, GatewayConfigFile};
pub use env::config_from_env;
pub use parser::{parse_config_from_file, parse_config_from_str};
