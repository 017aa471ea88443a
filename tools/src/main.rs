//! dash-runner: headless driver for the PortWatch operations dashboard.
//!
//! Usage:
//!   dash-runner --seed 12345 --duration-ms 30000
//!   dash-runner --config port.json --json
//!   dash-runner --realtime --duration-ms 10000
//!   dash-runner --ipc-mode

use anyhow::{Context, Result};
use portwatch_core::{
    adapters::{
        CardPanel, ChartPanel, ChartSurface, Dataset, ListPanel, TableRow, TableSurface,
        TextSurface,
    },
    camera::Viewport,
    clock::HostClock,
    config::DashboardConfig,
    dashboard::Dashboard,
    error::ViewResult,
    scene::{NodeKind, Vec3},
    types::Millis,
    view::{Panel, PanelAdapter, PanelUpdate, ViewRegistry},
};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::env;
use std::io::{self, BufRead, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};

const DEFAULT_VIEWPORT: Viewport = Viewport { width: 1280, height: 720 };
/// One simulated day per `advance` command.
const MAX_ADVANCE_MS: Millis = 86_400_000;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Advance { ms: Millis },
    Start,
    Stop,
    ResetCamera,
    ToggleAnimation,
    Resize { width: u32, height: u32 },
    Quit,
}

#[derive(serde::Serialize)]
struct UiState {
    now_ms:            Millis,
    ticks:             u64,
    running:           bool,
    animation_enabled: bool,
    camera:            Vec3,
    failed_pushes:     u64,
    panels:            BTreeMap<&'static str, serde_json::Value>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let json = args.iter().any(|a| a == "--json");
    let realtime = args.iter().any(|a| a == "--realtime");
    let duration = parse_arg(&args, "--duration-ms", 30_000u64);

    let mut config = match find_arg(&args, "--config") {
        Some(path) => DashboardConfig::load(path)
            .with_context(|| format!("loading dashboard config from {path}"))?,
        None => DashboardConfig::default(),
    };
    if let Some(seed) = find_arg(&args, "--seed").and_then(|s| s.parse().ok()) {
        config.seed = seed;
    }
    if let Some(ms) = find_arg(&args, "--interval-ms").and_then(|s| s.parse().ok()) {
        config.update_interval_ms = ms;
    }

    if ipc_mode {
        let latest = Latest::default();
        let mut views = ViewRegistry::new();
        for panel in Panel::ALL {
            views.mount(panel, Box::new(latest.clone()));
        }
        let mut dash = Dashboard::init(config, HostClock::starting_now(), views, None, DEFAULT_VIEWPORT)?;
        run_ipc_loop(&mut dash, &latest)?;
        dash.teardown()?;
        return Ok(());
    }

    println!("PortWatch dash-runner");
    println!("  seed:      {}", config.seed);
    println!("  interval:  {}ms", config.update_interval_ms);
    println!("  duration:  {duration}ms");
    println!("  mode:      {}", if realtime { "realtime" } else { "simulated" });
    println!();

    let views = if json { json_views() } else { console_views() };
    let mut dash = Dashboard::init(config, HostClock::starting_now(), views, None, DEFAULT_VIEWPORT)?;

    if realtime {
        run_realtime(&mut dash, duration)?;
    } else {
        dash.run_until(duration)?;
    }
    dash.teardown()?;
    print_summary(&dash);
    Ok(())
}

/// Sleep until each due time, then dispatch it, as a browser tab would.
fn run_realtime(dash: &mut Dashboard, duration: Millis) -> Result<()> {
    let started = Instant::now();
    while let Some(due) = dash.host().next_due() {
        if due > duration {
            break;
        }
        let target = Duration::from_millis(due);
        if let Some(wait) = target.checked_sub(started.elapsed()) {
            std::thread::sleep(wait);
        }
        // A slow dispatch may put us several periods behind; the host skips
        // the backlog rather than replaying it.
        let elapsed = started.elapsed().as_millis() as Millis;
        dash.pump(elapsed.max(due))?;
    }
    Ok(())
}

fn run_ipc_loop(dash: &mut Dashboard, latest: &Latest) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => {}
            IpcCommand::Advance { ms } => match advance_target(dash.host().now_ms(), ms) {
                Some(target) => dash.run_until(target)?,
                None => {
                    let err_json = serde_json::json!({
                        "error": format!("advance of {ms}ms exceeds {MAX_ADVANCE_MS}ms"),
                    });
                    writeln!(stdout, "{}", err_json)?;
                    stdout.flush()?;
                    continue;
                }
            },
            IpcCommand::Start => dash.start_updates()?,
            IpcCommand::Stop => dash.stop_updates()?,
            IpcCommand::ResetCamera => dash.reset_camera()?,
            IpcCommand::ToggleAnimation => {
                dash.toggle_animation()?;
            }
            IpcCommand::Resize { width, height } => {
                if !dash.resize(Viewport::new(width, height))? {
                    log::debug!("resize to {width}x{height} not applied");
                }
            }
        }
        let state = build_ui_state(dash, latest);
        writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
        stdout.flush()?;
    }
    Ok(())
}

/// Host time to run to for an `advance` command, or None when `ms` is
/// longer than one IPC step may simulate.
fn advance_target(now: Millis, ms: Millis) -> Option<Millis> {
    if ms > MAX_ADVANCE_MS {
        return None;
    }
    Some(now.saturating_add(ms))
}

fn build_ui_state(dash: &Dashboard, latest: &Latest) -> UiState {
    let stats = dash.scheduler().stats();
    UiState {
        now_ms:            dash.host().now_ms(),
        ticks:             stats.ticks,
        running:           dash.scheduler().is_running(),
        animation_enabled: dash.camera().animation_enabled(),
        camera:            dash.camera().camera().position,
        failed_pushes:     stats.failed_pushes,
        panels:            latest.snapshot(),
    }
}

fn print_summary(dash: &Dashboard) {
    let stats = dash.scheduler().stats();
    let history = dash.scheduler().history();
    let scene = dash.scene();

    println!();
    println!("=== RUN SUMMARY ===");
    println!("  host time:        {}ms", dash.host().now_ms());
    println!("  ticks:            {}", stats.ticks);
    println!("  frames:           {}", dash.camera().frames());
    println!("  samples appended: {}", stats.samples_appended);
    println!("  samples evicted:  {}", stats.samples_evicted);
    println!("  skipped pushes:   {}", stats.skipped_pushes);
    println!("  failed pushes:    {}", stats.failed_pushes);
    if let Some(last) = history.latest() {
        println!("  latest sample:    {last:.0} TEU ({} held)", history.len());
    }
    println!();
    println!("=== SCENE ===");
    println!("  nodes:            {}", scene.len());
    println!("  cranes:           {}", scene.count(NodeKind::CraneBase));
    println!("  containers:       {}", scene.count(NodeKind::Container));
}

// ── Panel sinks ──────────────────────────────────────

/// Keeps the most recent payload per panel for IPC state replies.
#[derive(Clone, Default)]
struct Latest {
    panels: Rc<RefCell<BTreeMap<&'static str, serde_json::Value>>>,
}

impl Latest {
    fn snapshot(&self) -> BTreeMap<&'static str, serde_json::Value> {
        self.panels.borrow().clone()
    }
}

impl PanelAdapter for Latest {
    fn render(&mut self, update: &PanelUpdate<'_>) -> ViewResult<()> {
        let value = serde_json::to_value(update)?;
        self.panels.borrow_mut().insert(update.panel().name(), value);
        Ok(())
    }
}

/// One JSON object per push on stdout.
struct JsonLines;

impl PanelAdapter for JsonLines {
    fn render(&mut self, update: &PanelUpdate<'_>) -> ViewResult<()> {
        let line = serde_json::to_string(update)?;
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{line}")?;
        Ok(())
    }
}

fn json_views() -> ViewRegistry {
    let mut views = ViewRegistry::new();
    for panel in Panel::ALL {
        views.mount(panel, Box::new(JsonLines));
    }
    views
}

/// Plain-text surface for every stock adapter.
struct Console {
    panel: &'static str,
}

impl TextSurface for Console {
    fn set_text(&mut self, slot: &str, text: &str) -> ViewResult<()> {
        log::trace!("[{}] {slot} = {text}", self.panel);
        Ok(())
    }

    fn set_progress(&mut self, slot: &str, pct: f64) -> ViewResult<()> {
        println!("[{}] {slot}: {pct:.1}%", self.panel);
        Ok(())
    }
}

impl TableSurface for Console {
    fn replace_rows(&mut self, rows: Vec<TableRow>) -> ViewResult<()> {
        println!("[{}] {} rows", self.panel, rows.len());
        for row in rows {
            let class = row.class.as_deref().unwrap_or("-");
            println!("    {:<10} {}", class, row.cells.join(" | "));
        }
        Ok(())
    }
}

impl ChartSurface for Console {
    fn replace_data(&mut self, labels: &[String], datasets: &[Dataset]) -> ViewResult<()> {
        for set in datasets {
            let points: Vec<String> = labels
                .iter()
                .zip(&set.values)
                .map(|(l, v)| format!("{l}={v:.0}"))
                .collect();
            println!("[{}] {}: {}", self.panel, set.label, points.join(" "));
        }
        Ok(())
    }
}

/// Cards print on each push; their animated counters only reach the log.
struct CardEcho {
    inner: CardPanel<Console>,
}

impl PanelAdapter for CardEcho {
    fn render(&mut self, update: &PanelUpdate<'_>) -> ViewResult<()> {
        if let PanelUpdate::Kpis(k) = update {
            println!(
                "[kpis] ships={} teu={} online={}% efficiency={}%",
                k.active_ship_count, k.throughput_teu, k.equipment_online_pct, k.efficiency_pct
            );
        }
        self.inner.render(update)
    }

    fn on_frame(&mut self, now: Millis) -> ViewResult<()> {
        self.inner.on_frame(now)
    }
}

fn console_views() -> ViewRegistry {
    let card = |panel| Box::new(CardEcho { inner: CardPanel::new(Some(Console { panel })) });
    let list = |panel| Box::new(ListPanel::new(Some(Console { panel })));
    let chart = |panel| Box::new(ChartPanel::new(Some(Console { panel })));

    ViewRegistry::new()
        .with(Panel::Kpis, card("kpis"))
        .with(Panel::Carbon, card("carbon"))
        .with(Panel::Ships, list("ships"))
        .with(Panel::Alerts, list("alerts"))
        .with(Panel::EquipmentList, list("equipment"))
        .with(Panel::ThroughputTrend, chart("throughput"))
        .with(Panel::CarbonTrend, chart("carbon-trend"))
        .with(Panel::EquipmentStatus, chart("equipment-status"))
        .with(Panel::EmissionSources, chart("emissions"))
        .with(Panel::Readiness, chart("readiness"))
}

fn find_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2).find(|w| w[0] == flag).map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    find_arg(args, flag)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_target_is_bounded() {
        assert_eq!(advance_target(1_000, 500), Some(1_500));
        assert_eq!(advance_target(1_000, MAX_ADVANCE_MS), Some(1_000 + MAX_ADVANCE_MS));
        assert_eq!(advance_target(1_000, MAX_ADVANCE_MS + 1), None);
        assert_eq!(advance_target(1_000, u64::MAX), None);
        assert_eq!(advance_target(u64::MAX - 10, 500), Some(u64::MAX));
    }

    #[test]
    fn advance_command_parses() {
        let cmd: IpcCommand =
            serde_json::from_str(r#"{"type":"advance","ms":18446744073709551615}"#).unwrap();
        assert!(matches!(cmd, IpcCommand::Advance { ms: u64::MAX }));
    }
}
