use ecs_core::event::JsonlEventSink;
use ecs_core::Settings;

pub fn run(settings: &Settings, limit: usize) -> anyhow::Result<()> {
    let sink = JsonlEventSink::new(&settings.data_dir());
    let events = sink.read_recent(limit)?;
    if events.is_empty() {
        eprintln!("No events recorded in {}", sink.path().display());
        return Ok(());
    }
    for event in &events {
        println!("{}", event.to_jsonl_line());
    }
    Ok(())
}
