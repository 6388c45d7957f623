//! Dashboard demo: charts fed by a background thread, redrawn on a timer.
//!
//! Demonstrates:
//! - Theme selection from `--theme`, `TRELLIS_THEME` or the preference file
//! - A nested row/column layout of shared widgets
//! - Data updates from another thread between frames
//! - Diff rendering, or full redraws with `--full-redraw`
//!
//! Keys: `q` / `Ctrl-C` quit, `j` / `k` move the list selection,
//! `h` / `l` switch tabs, `s` saves the current theme as the preference.
//!
//! Logs go to stderr; run with `RUST_LOG=trellis=debug 2>dashboard.log`.

use anyhow::Result;
use clap::Parser;
use crossbeam_channel::select;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use trellis::config::{self, ThemeSelector};
use trellis::terminal::AnsiBackend;
use trellis::widget::{
    lock, shared, BarChart, Drawable, Gauge, List, Paragraph, PieChart, Plot, Shared, Sparkline,
    SparklineGroup, Tabs,
};
use trellis::{
    InputEvent, Layout, LayoutNode, Rect, RenderMode, Renderer, RendererConfig, Terminal,
    TerminalConfig, Theme, ThemeRegistry, Ticker,
};

#[derive(Debug, Parser)]
#[command(about = "Live terminal dashboard")]
struct Args {
    /// Theme name: dark, light or default.
    #[arg(long)]
    theme: Option<String>,

    /// Milliseconds between timer frames.
    #[arg(long, default_value_t = 250)]
    tick_ms: u64,

    /// Redraw every cell each frame instead of diffing.
    #[arg(long)]
    full_redraw: bool,
}

/// Why the main loop woke up.
enum Wake {
    Input(InputEvent),
    Tick,
    Disconnected,
}

/// Widgets the data thread writes to.
struct Live {
    plot: Shared<Plot>,
    gauge: Shared<Gauge>,
    sparklines: Shared<SparklineGroup>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut registry = ThemeRegistry::new();
    let theme = ThemeSelector::from_env(args.theme.clone())
        .apply(&mut registry)?
        .clone();

    let terminal = Terminal::init(TerminalConfig::default())?;
    let (width, height) = terminal.size()?;

    let mode = if args.full_redraw { RenderMode::Full } else { RenderMode::Diff };
    let mut renderer = Renderer::with_config(AnsiBackend::stdout(), RendererConfig { mode })?;

    let tabs = shared(Tabs::new(&theme, ["overview", "network", "disks"]));
    let list = shared(process_list(&theme));
    let live = Live {
        plot: shared(Plot::new(&theme)),
        gauge: shared(Gauge::new(&theme)),
        sparklines: shared(SparklineGroup::new(
            &theme,
            vec![Sparkline::new(&theme).title("rx"), Sparkline::new(&theme).title("tx")],
        )),
    };

    let layout = shared(build_layout(&theme, &tabs, &list, &live));
    lock(&layout).set_area(Rect::from_size(width, height));

    let running = Arc::new(AtomicBool::new(true));
    let feeder = spawn_feeder(&live, Arc::clone(&running))?;
    let ticker = Ticker::spawn(Duration::from_millis(args.tick_ms))?;

    renderer.render(&[&*layout])?;

    while running.load(Ordering::Relaxed) {
        let wake = select! {
            recv(terminal.events()) -> event => event.map_or(Wake::Disconnected, Wake::Input),
            recv(ticker.receiver()) -> _ => Wake::Tick,
        };
        match wake {
            Wake::Disconnected => break,
            Wake::Tick => {}
            Wake::Input(event) => match event.id().as_str() {
                "q" | "<C-c>" => break,
                "j" | "<Down>" => lock(&list).scroll_down(),
                "k" | "<Up>" => lock(&list).scroll_up(),
                "h" | "<Left>" => lock(&tabs).focus_left(),
                "l" | "<Right>" => lock(&tabs).focus_right(),
                "s" => config::save_preference(registry.active_name())?,
                "<Resize>" => {
                    let (w, h) = terminal.size()?;
                    lock(&layout).set_area(Rect::from_size(w, h));
                    renderer.resize(w, h);
                    renderer.clear()?;
                }
                _ => continue,
            },
        }
        renderer.render(&[&*layout])?;
    }

    running.store(false, Ordering::Relaxed);
    let _ = feeder.join();
    ticker.join();
    drop(terminal);

    let stats = renderer.stats();
    println!("{} frames, {} cells written", stats.frames, stats.total_cells);
    Ok(())
}

fn process_list(theme: &Theme) -> List {
    let mut list = List::new(theme);
    list.block.title = "processes".into();
    list.rows = vec![
        "[renderer](fg:green) 2.1%".into(),
        "[ticker](fg:cyan) 0.1%".into(),
        "[input](fg:yellow) 0.3%".into(),
        "feeder 1.4%".into(),
        "[idle](mod:dim) 96.1%".into(),
    ];
    list
}

fn build_layout(theme: &Theme, tabs: &Shared<Tabs>, list: &Shared<List>, live: &Live) -> Layout {
    let mut bars = BarChart::new(theme);
    bars.block.title = "load".into();
    bars.data = vec![3.0, 5.0, 2.0, 7.0, 4.0];
    bars.labels = ["mon", "tue", "wed", "thu", "fri"].map(String::from).to_vec();

    let mut pie = PieChart::new(theme);
    pie.block.title = "share".into();
    pie.data = vec![40.0, 25.0, 20.0, 15.0];
    pie.label_formatter = Some(Box::new(|_, v| format!("{v:.0}%")));

    let mut about = Paragraph::new(theme).text(
        "[trellis](fg:cyan,mod:bold) diffs every frame against the cached screen \
         and writes only the cells that changed.",
    );
    about.block.title = "about".into();

    lock(&live.plot).block.title = "latency".into();
    lock(&live.gauge).block.title = "memory".into();

    let mut layout = Layout::new();
    layout.set([
        LayoutNode::row(0.1, [LayoutNode::widget(tabs.clone())]),
        LayoutNode::row(
            0.45,
            [
                LayoutNode::column(0.5, [LayoutNode::widget(shared(bars))]),
                LayoutNode::column(0.5, [LayoutNode::widget(live.plot.clone())]),
            ],
        ),
        LayoutNode::row(
            0.45,
            [
                LayoutNode::column(
                    0.5,
                    [
                        LayoutNode::row(0.3, [LayoutNode::widget(live.gauge.clone())]),
                        LayoutNode::row(0.7, [LayoutNode::widget(live.sparklines.clone())]),
                    ],
                ),
                LayoutNode::column(0.25, [LayoutNode::widget(shared(pie))]),
                LayoutNode::column(
                    0.25,
                    [
                        LayoutNode::row(0.6, [LayoutNode::widget(list.clone())]),
                        LayoutNode::row(0.4, [LayoutNode::widget(shared(about))]),
                    ],
                ),
            ],
        ),
    ]);
    layout
}

/// Push a new sample into the live widgets every 100 ms.
fn spawn_feeder(live: &Live, running: Arc<AtomicBool>) -> Result<thread::JoinHandle<()>> {
    let plot = Arc::clone(&live.plot);
    let gauge = Arc::clone(&live.gauge);
    let sparklines = Arc::clone(&live.sparklines);

    let handle = thread::Builder::new().name("feeder".into()).spawn(move || {
        let mut t = 0.0_f64;
        while running.load(Ordering::Relaxed) {
            t += 0.1;
            push_sample(&plot, &gauge, &sparklines, t);
            thread::sleep(Duration::from_millis(100));
        }
    })?;
    Ok(handle)
}

fn push_sample(
    plot: &Mutex<Plot>,
    gauge: &Mutex<Gauge>,
    sparklines: &Mutex<SparklineGroup>,
    t: f64,
) {
    const WINDOW: usize = 120;

    {
        let mut plot = lock(plot);
        if plot.data.is_empty() {
            plot.data = vec![Vec::new(), Vec::new()];
        }
        plot.data[0].push(t.sin().mul_add(4.0, 5.0));
        plot.data[1].push((t * 0.7).cos().mul_add(3.0, 4.0));
        for series in &mut plot.data {
            if series.len() > WINDOW {
                series.remove(0);
            }
        }
    }

    lock(gauge).percent = ((t * 0.3).sin().mul_add(40.0, 50.0)) as u16;

    let mut group = lock(sparklines);
    for (i, sparkline) in group.sparklines.iter_mut().enumerate() {
        let phase = t.mul_add(1.3, i as f64);
        sparkline.data.push(phase.sin().abs() * 10.0);
        if sparkline.data.len() > WINDOW {
            sparkline.data.remove(0);
        }
    }
}
