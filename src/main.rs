use std::process;

use anyhow::{Context, Result, bail};

use term_nexus::{
    config::GameConfig,
    graphics::{Animation, PaletteProcessor, SizePolicy},
    player::GameLoop,
    types::Size,
};

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

const PLAY_USAGE: &str = "term-nexus play <file.gif|url> [--size WxH | --scale PERCENT]";

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);

    match args.next().as_deref() {
        Some("play") => {
            let source = args.next().context(PLAY_USAGE)?;
            let policy = parse_policy(args)?;
            play(&source, policy)
        }
        _ => bail!(
            "term-nexus — play animated GIFs in the terminal\n\nUsage:\n  {PLAY_USAGE}"
        ),
    }
}

fn parse_policy(mut args: impl Iterator<Item = String>) -> Result<SizePolicy> {
    match args.next().as_deref() {
        None => Ok(SizePolicy::Native),
        Some("--size") => {
            let value = args.next().context(PLAY_USAGE)?;
            let (w, h) = value
                .split_once('x')
                .with_context(|| format!("Expected WxH, got {value}"))?;
            let size = Size::new(
                w.parse().with_context(|| format!("Invalid width {w}"))?,
                h.parse().with_context(|| format!("Invalid height {h}"))?,
            );
            Ok(SizePolicy::Absolute(size))
        }
        Some("--scale") => {
            let value = args.next().context(PLAY_USAGE)?;
            let percent = value
                .trim_end_matches('%')
                .parse()
                .with_context(|| format!("Invalid scale {value}"))?;
            Ok(SizePolicy::Relative(percent))
        }
        Some(other) => bail!("Unknown option {other}\n\nUsage:\n  {PLAY_USAGE}"),
    }
}

fn play(source: &str, policy: SizePolicy) -> Result<()> {
    let config = GameConfig::load();
    let processor = PaletteProcessor::new(config.color_palette.clone());

    let animation = if source.starts_with("http://") || source.starts_with("https://") {
        Animation::from_url(source, &processor, policy)
    } else {
        Animation::from_path(source, &processor, policy)
    }
    .with_context(|| format!("Failed to load {source}"))?;

    let mut game = GameLoop::new(animation, config);
    game.run()?;
    Ok(())
}
