pub mod aws_cli_client;

pub use aws_cli_client::AwsCliClient;
