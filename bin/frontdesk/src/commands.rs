use anyhow::Context;
use frontdesk_agent::{AgentRegistry, IntentClassifier, RoutingPipeline};
use frontdesk_core::{InboundMessage, Paths, RoutingConfig};
use frontdesk_storage::MemoryStore;

fn open_store(paths: &Paths) -> anyhow::Result<MemoryStore> {
    paths.ensure_dirs()?;
    MemoryStore::open(&paths.memory_db()).context("Failed to open memory db")
}

fn load_config(paths: &Paths) -> anyhow::Result<RoutingConfig> {
    RoutingConfig::load_or_default(paths).context("Failed to load routing config")
}

/// Run one message through the full pipeline and print the reply.
pub fn route(user: &str, tenant: &str, region: &str, text: &str) -> anyhow::Result<()> {
    let paths = Paths::default();
    let config = load_config(&paths)?;
    let store = open_store(&paths)?;
    let pipeline = RoutingPipeline::new(config, AgentRegistry::default(), store);

    let msg = InboundMessage::new(user, tenant, text, region);
    let routed = pipeline.handle_message(&msg)?;

    println!();
    println!("{}", routed.reply);
    println!();
    println!("  intent:     {}", routed.intent);
    println!("  confidence: {:.2}", routed.confidence);
    Ok(())
}

/// Classify only; nothing is dispatched or persisted.
pub fn classify(region: &str, text: &str) -> anyhow::Result<()> {
    let paths = Paths::default();
    let config = load_config(&paths)?;
    let locale = config.locale_for_region(region).to_string();
    let classifier = IntentClassifier::new(config);

    let result = classifier.classify(text, region);

    println!();
    println!("  intent:         {}", result.intent);
    println!("  confidence:     {:.2}", result.confidence);
    println!("  recommendation: {}", result.recommendation);
    if let Some(niche) = &result.niche {
        println!("  niche:          {}", niche);
    }
    println!("  locale:         {}", locale);
    println!("  lead score:     {:.2}", frontdesk_agent::score_lead(text));
    Ok(())
}

/// Print the latest memory record for a conversation.
pub fn recall(user: &str, tenant: &str) -> anyhow::Result<()> {
    let paths = Paths::default();
    let store = open_store(&paths)?;

    match store.recall_latest(user, tenant)? {
        Some(record) => {
            println!();
            println!("  intent:     {}", record.intent);
            println!("  message:    {}", record.message_text);
            println!("  confidence: {:.2}", record.confidence);
            println!("  created at: {}", record.created_at);
        }
        None => println!("(No memory for {}:{})", tenant, user),
    }
    Ok(())
}

/// Print recent transcript entries, newest first.
pub fn log(user: &str, tenant: &str, limit: usize) -> anyhow::Result<()> {
    let paths = Paths::default();
    let store = open_store(&paths)?;

    let entries = store.recent_messages(user, tenant, limit)?;
    if entries.is_empty() {
        println!("(No transcript for {}:{})", tenant, user);
        return Ok(());
    }

    println!();
    for entry in &entries {
        println!("[{}]", entry.created_at);
        println!("  > {}", entry.message);
        println!("  < {}", entry.reply);
        println!();
    }
    Ok(())
}

/// Retention maintenance. Scheduled externally; the pipeline never prunes.
pub fn prune(max: usize, messages: bool) -> anyhow::Result<()> {
    let paths = Paths::default();
    let store = open_store(&paths)?;

    let deleted = if messages {
        store.prune_messages(max)?
    } else {
        store.prune(max)?
    };
    let table = if messages { "transcript entries" } else { "memory records" };
    println!("Deleted {} {} (kept the newest {})", deleted, table, max);
    Ok(())
}

/// Print store row counts.
pub fn stats() -> anyhow::Result<()> {
    let paths = Paths::default();
    if !paths.memory_db().exists() {
        println!("(Memory database not created yet)");
        return Ok(());
    }
    let store = open_store(&paths)?;
    let stats = store.stats()?;

    println!();
    println!("Memory store ({})", stats["db_path"].as_str().unwrap_or("?"));
    println!("  Memory records:     {}", stats["memory_records"]);
    println!("  Transcript entries: {}", stats["transcript_entries"]);
    Ok(())
}
