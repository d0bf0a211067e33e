pub mod base_commands;
pub mod forecast_cmd;
pub mod quick_cmd;
pub mod report_format;
