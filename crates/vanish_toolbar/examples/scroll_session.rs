//! Scroll Session Demo
//!
//! Drives a simulated page (an `app-toolbar` wrapping an `ion-toolbar` above
//! a scroll area) through a scripted scroll gesture, flushing style writes
//! once per frame and printing the toolbar's inline style after each one.
//!
//! Run with: RUST_LOG=vanish_toolbar=debug cargo run -p vanish_toolbar --example scroll_session

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use vanish_core::{FrameWriteQueue, ScrollEmitter};
use vanish_style::SharedStyleTree;
use vanish_toolbar::{ScrollVanish, VanishConfig};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let tree = SharedStyleTree::default();
    let (host, toolbar) = tree.with_mut(|t| {
        let header = t.create_element("ion-header");
        let host = t.create_element("app-toolbar");
        let toolbar = t.create_element("ion-toolbar");
        t.append_child(header, host);
        t.append_child(host, toolbar);
        (host, toolbar)
    });

    let frames = FrameWriteQueue::new();
    let content = ScrollEmitter::new();

    let mut vanish = ScrollVanish::new(host, tree.clone(), frames.clone());
    vanish.set_scroll_area(content.clone());
    vanish.initialize(VanishConfig::default())?;
    frames.flush();

    // Down the page, a short nudge back, then a fling back to the top
    let gesture = [12.0, 40.0, 95.0, 160.0, 240.0, 228.0, 190.0, 150.0, 300.0, 0.0];

    for (frame, y) in gesture.into_iter().enumerate() {
        content.scroll_to(y);
        let writes = frames.flush();
        let css = tree.with(|t| t.css_text(toolbar)).unwrap_or_default();
        println!(
            "frame {frame:>2}  y={y:>6.1}  hidden={:<5}  writes={writes}  style=\"{css}\"",
            vanish.is_hidden()
        );
    }

    println!("transitions: {:?}", vanish.history());
    vanish.detach();
    Ok(())
}
