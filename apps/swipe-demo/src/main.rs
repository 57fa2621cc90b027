use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use swipedeck_core::FRAME_INTERVAL_NANOS;
use swipedeck_runtime_std::StdRuntime;
use swipedeck_ui::{
    AnimatedBox, AnimatedBoxConfig, CardContentProvider, IconCatalog, PointerEvent, SwipeDeck,
    SwipeDeckConfig,
};

const DEFAULT_WIDTH: f32 = 400.0;
const MAX_FRAMES_PER_STEP: usize = 600;

fn main() -> Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let width = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<f32>()
            .with_context(|| format!("invalid screen width {arg:?}"))?,
        None => DEFAULT_WIDTH,
    };

    let runtime = StdRuntime::new();
    let icons = IconCatalog::default();
    let mut deck = SwipeDeck::new(SwipeDeckConfig::new(width), runtime.runtime_handle())
        .context("failed to build swipe deck")?;

    println!("=== SwipeDeck Demo ===");
    println!("Deck of {} cards, screen width {width}", icons.len());
    println!();

    for (label, end_x) in [
        ("swipe left past the threshold", -0.55 * width),
        ("short nudge right", 0.2 * width),
        ("swipe right past the threshold", 0.7 * width),
    ] {
        log::info!("{label}");
        drag(&runtime, &mut deck, end_x)?;
        settle(&runtime, |_| {
            let visuals = deck.visuals();
            log::debug!(
                "offset {:>8.2} rotation {:>6.2} next {:.3}",
                visuals.offset,
                visuals.rotation_degrees,
                visuals.next_card_scale
            );
        })?;
        log::info!(
            "card {} showing {:?}, next {:?}",
            deck.card_index(),
            deck.current_content(&icons),
            deck.next_content(&icons)
        );
    }

    let mut animated_box = AnimatedBox::new(AnimatedBoxConfig::default(), runtime.runtime_handle())
        .context("failed to build animated box")?;
    for _ in 0..2 {
        animated_box.handle_pointer(&PointerEvent::down(0.0, 0.0));
        if !animated_box.handle_pointer(&PointerEvent::up(0.0, 0.0)) {
            bail!("box did not register the tap");
        }
        settle(&runtime, |_| {
            log::debug!(
                "box y {:>8.2} radius {:>6.2}",
                animated_box.translate_y(),
                animated_box.border_radius()
            );
        })?;
        log::info!(
            "box is {} (radius {})",
            if animated_box.is_up() { "up" } else { "down" },
            animated_box.border_radius()
        );
    }

    Ok(())
}

/// Replays a pointer drag from the origin to `end_x` over a handful of frames.
fn drag(runtime: &StdRuntime, deck: &mut SwipeDeck, end_x: f32) -> Result<()> {
    const STEPS: u16 = 8;

    deck.handle_pointer(&PointerEvent::down(0.0, 0.0));
    for step in 1..=STEPS {
        let x = end_x * f32::from(step) / f32::from(STEPS);
        deck.handle_pointer(&PointerEvent::moved(x, 0.0));
        // One pointer sample per frame; the press animation keeps running.
        thread::sleep(Duration::from_nanos(FRAME_INTERVAL_NANOS));
        runtime.pump_frame();
    }
    let outcome = deck
        .handle_pointer(&PointerEvent::up(end_x, 0.0))
        .context("drag was too short to register")?;
    log::info!("released at {end_x:.1}: {outcome:?}");
    Ok(())
}

/// Draws frames until nothing is animating.
fn settle(runtime: &StdRuntime, on_frame: impl FnMut(u64)) -> Result<()> {
    let frames = runtime
        .run_until_idle(MAX_FRAMES_PER_STEP, on_frame)
        .context("animations did not settle")?;
    log::debug!("settled after {frames} frames");
    Ok(())
}
