use mcp_commons::adapter::ResultEnvelope;
use mcp_commons::config::ConfigLoader;
use mcp_commons::primitives::ToolSignature;
use mcp_commons::registry::{
    AdaptedCatalog, InMemoryToolHost, bulk_register, bulk_replace_tools,
    conditional_remove_tools, count_tools, log_registration_summary,
};
use serde_json::{Value, json};

async fn greet(input: Value) -> Result<String, String> {
    match input["name"].as_str() {
        Some(name) if !name.is_empty() => Ok(format!("hello, {name}")),
        _ => Err("name is required".into()),
    }
}

#[tokio::test]
async fn startup_register_then_hot_swap() {
    let config = ConfigLoader::new()
        .with_env_prefix("MCP_COMMONS_FACADE_TEST_UNSET_")
        .load()
        .unwrap();
    let host = InMemoryToolHost::new();

    let catalog = AdaptedCatalog::new()
        .tool(ToolSignature::new("greet", "Greet someone").unwrap(), greet)
        .unwrap()
        .tool(
            ToolSignature::new("tmp_probe", "Temporary health probe").unwrap(),
            |_input: Value| async move { Ok::<_, String>(json!({ "ok": true })) },
        )
        .unwrap()
        .into_catalog();
    let total = catalog.len();
    let registered = bulk_register(&host, catalog).await.unwrap();
    log_registration_summary(registered.len(), total, &config.server_name);
    assert_eq!(registered.len(), 2);

    let reply = host.invoke("greet", json!({ "name": "ana" })).await.unwrap();
    assert_eq!(
        ResultEnvelope::from_value(reply).unwrap(),
        ResultEnvelope::success("hello, ana")
    );

    let loud = AdaptedCatalog::new()
        .tool(
            ToolSignature::new("greet", "Greet someone loudly").unwrap(),
            |input: Value| async move { greet(input).await.map(|text| text.to_uppercase()) },
        )
        .unwrap()
        .into_catalog();
    let outcome = bulk_replace_tools(&host, &["greet"], loud).await.unwrap();
    assert!(outcome.is_complete());

    let reply = host.invoke("greet", json!({ "name": "ana" })).await.unwrap();
    assert_eq!(reply["data"], json!("HELLO, ANA"));

    let removed = conditional_remove_tools(&host, |name| name.starts_with("tmp_"))
        .await
        .unwrap();
    assert_eq!(removed, vec!["tmp_probe"]);
    assert_eq!(count_tools(&host).await.unwrap(), 1);
}
