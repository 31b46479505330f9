use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tree_lights::config::{Settings, custom_mode};
use tree_lights::driver::{Apa102Driver, DriverKind, NullDriver, OutputDriver, TerminalDriver};
use tree_lights::frame_scheduler::frame_duration;
use tree_lights::transport::{QueueTransport, UdpListener, UdpPublisher};
use tree_lights::{
    FrameScheduler, FrameState, Geometry, MessageChannel, ModeId, ModeSet, Role,
    SchedulerOptions,
};

static MESSAGES: MessageChannel = MessageChannel::new();

#[derive(Parser, Debug)]
#[command(name = "tree-lights", version, about = "Animated LED patterns for a tree")]
struct Args {
    /// Settings file
    #[arg(long, default_value = "config/tree.toml")]
    config: PathBuf,

    /// Show only this scene
    #[arg(long, conflicts_with = "sprite")]
    scene: Option<String>,

    /// Show only this sprite
    #[arg(long)]
    sprite: Option<String>,

    /// Publish rendered frames instead of following control messages
    #[arg(long, default_value_t = false)]
    leader: bool,

    /// Warn when a frame overruns its budget
    #[arg(long, default_value_t = false)]
    warn: bool,

    /// Log the frame rate once per second
    #[arg(long, default_value_t = false)]
    print_frame_rate: bool,

    /// Target frame rate, overrides the settings file
    #[arg(long)]
    fps: Option<f32>,

    /// Output driver: terminal, apa102 or null
    #[arg(long, value_parser = parse_driver)]
    driver: Option<DriverKind>,

    /// Address to receive control messages on
    #[arg(long)]
    listen: Option<SocketAddr>,

    /// Address to publish frames to when leading
    #[arg(long)]
    peer: Option<SocketAddr>,

    /// More logging; repeat for trace output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_driver(s: &str) -> Result<DriverKind, String> {
    DriverKind::parse_from_str(s).ok_or_else(|| format!("unknown driver {s:?}"))
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open_driver(settings: &Settings, geometry: &Geometry) -> Result<Box<dyn OutputDriver>> {
    let display_config = &settings.display;
    let driver: Box<dyn OutputDriver> = match display_config.driver {
        DriverKind::Terminal => Box::new(TerminalDriver::new(
            io::stdout(),
            geometry,
            display_config.size,
        )),
        DriverKind::Apa102 => Box::new(
            Apa102Driver::open(&display_config.device, display_config.brightness)
                .with_context(|| format!("failed to open {}", display_config.device.display()))?,
        ),
        DriverKind::Null => Box::new(NullDriver),
    };
    info!(driver = display_config.driver.as_str(), "display ready");
    Ok(driver)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut settings = Settings::load(&args.config)
        .with_context(|| format!("failed to load {}", args.config.display()))?;
    if let Some(fps) = args.fps {
        settings.frame.fps = fps;
        settings.frame.validate()?;
    }
    if let Some(driver) = args.driver {
        settings.display.driver = driver;
    }
    if args.listen.is_some() {
        settings.transport.listen = args.listen;
    }
    if args.peer.is_some() {
        settings.transport.peer = args.peer;
    }

    let geometry = settings.pixels.geometry()?;
    info!(pixels = geometry.count(), "geometry loaded");

    let mut modes = ModeSet::new(&geometry);
    let custom = custom_mode(args.scene.as_deref(), args.sprite.as_deref(), &geometry)?;
    let initial = if let Some(mode) = custom {
        modes = modes.with_custom(mode);
        ModeId::Custom
    } else {
        ModeId::Attract
    };
    let mut state = FrameState::new(modes, geometry.count())
        .with_spin(settings.frame.spin_step, settings.frame.spin_limit);
    state.select_mode(initial);

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = Arc::clone(&shutdown);
        ctrlc::set_handler(move || shutdown.store(true, Ordering::Relaxed))
            .context("failed to install Ctrl-C handler")?;
    }

    let role = if args.leader { Role::Leader } else { Role::Follower };
    let listener = match (role, settings.transport.listen) {
        (Role::Follower, Some(addr)) => Some(
            UdpListener::spawn(addr, MESSAGES.sender(), Arc::clone(&shutdown))
                .with_context(|| format!("failed to listen on {addr}"))?,
        ),
        _ => None,
    };
    let mut transport = QueueTransport::new(MESSAGES.receiver());
    if let (Role::Leader, Some(peer)) = (role, settings.transport.peer) {
        transport = transport.with_publisher(UdpPublisher::connect(peer)?);
    }

    let driver = open_driver(&settings, &geometry)?;
    let options = SchedulerOptions {
        frame_duration: frame_duration(settings.frame.fps),
        role,
        warn_lag: args.warn,
        print_frame_rate: args.print_frame_rate,
    };
    let mut scheduler = FrameScheduler::new(&geometry, state, driver, transport, options);
    let result = scheduler.run(&shutdown);

    shutdown.store(true, Ordering::Relaxed);
    if let Some(listener) = listener {
        listener.join();
    }
    result.context("display failed")?;
    info!("stopped");
    Ok(())
}
