use core_engine::{compose, config, logging, EngineConfig, HostBindings};

fn main() {
    logging::init();

    let config = match EngineConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let ctx = config::context_from_env();
    let env = compose(&ctx, &config, HostBindings::default());

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to build runtime");
    let messaging = rt.block_on(env.is_messaging_supported());

    let snapshot = env.providers().snapshot();
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: failed to serialize providers: {}", e),
    }
    match messaging {
        Ok(supported) => println!("messaging deep link supported: {}", supported),
        Err(e) => println!("messaging deep link probe failed: {}", e),
    }
}
