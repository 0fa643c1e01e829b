use naming_core::{ContextConfig, InitialContext};

pub fn run(config: &ContextConfig, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let context = InitialContext::new(config.clone())?;
    let descriptor = context.prepare_descriptor(name)?;

    println!("{}", serde_json::to_string_pretty(&descriptor)?);
    Ok(())
}
