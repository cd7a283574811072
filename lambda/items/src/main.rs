use lambda_http::{run, service_fn, tracing, Error};

mod config;
mod error;
mod http_handler;
mod item;
mod store;

use config::Config;
use http_handler::function_handler;
use store::dynamodb::DynamoDbStore;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let config = Config::from_env();
    tracing::info!(table_name = %config.table_name, "starting items handler");

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let client = aws_sdk_dynamodb::Client::new(&aws_config);
    let store = DynamoDbStore::new(client, &config);

    run(service_fn(|event| function_handler(&store, event))).await
}
