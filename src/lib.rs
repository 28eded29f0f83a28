pub mod configuration;
pub mod data;
pub mod routes;
pub mod startup;
pub mod telemetry;
pub mod util;
pub mod validator;
