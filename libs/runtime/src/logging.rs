use crate::config::{LoggingConfig, Section};
use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    ContentLimit, FileRotate,
};
use parking_lot::Mutex;
use std::{
    collections::HashMap,
    io::{IsTerminal, Write},
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::{level_filters::LevelFilter, Level};
use tracing_subscriber::{
    filter::{FilterFn, Targets},
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    Layer, Registry,
};

const DEFAULT_SECTION: &str = "default";
const DEFAULT_MAX_SIZE_MB: u64 = 100;
const DEFAULT_MAX_BACKUPS: usize = 5;

/// Parse a configured level. `off`/`none` disable output; unknown values fall back to INFO.
fn parse_level(s: &str) -> Option<Level> {
    match s.trim().to_ascii_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        "off" | "none" => None,
        _ => Some(Level::INFO),
    }
}

/// True if `target` is `subsystem` itself or one of its child modules.
fn target_in(target: &str, subsystem: &str) -> bool {
    target
        .strip_prefix(subsystem)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
}

// -------- rotating files --------

type SharedRotation = Arc<Mutex<FileRotate<AppendTimestamp>>>;

#[derive(Clone)]
struct LogFile(SharedRotation);

impl Write for LogFile {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0.lock().flush()
    }
}

/// Writer that silently drops records when no file is routed.
struct MaybeLogFile(Option<LogFile>);

impl Write for MaybeLogFile {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match &mut self.0 {
            Some(f) => f.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match &mut self.0 {
            Some(f) => f.flush(),
            None => Ok(()),
        }
    }
}

/// Picks a log file per event target: a subsystem file when one matches, else the default file.
#[derive(Clone, Default)]
struct FileRouter {
    default: Option<LogFile>,
    subsystems: HashMap<String, LogFile>,
}

impl FileRouter {
    fn route(&self, target: &str) -> Option<LogFile> {
        self.subsystems
            .iter()
            .find(|(name, _)| target_in(target, name))
            .map(|(_, f)| f.clone())
            .or_else(|| self.default.clone())
    }

    fn is_empty(&self) -> bool {
        self.default.is_none() && self.subsystems.is_empty()
    }
}

impl<'a> fmt::MakeWriter<'a> for FileRouter {
    type Writer = MaybeLogFile;

    fn make_writer(&'a self) -> Self::Writer {
        MaybeLogFile(self.default.clone())
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        MaybeLogFile(self.route(meta.target()))
    }
}

/// Resolve a log file path against `base_dir`. Absolute paths are kept as-is.
fn resolve_log_path(file: &str, base_dir: &Path) -> PathBuf {
    let p = Path::new(file);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}

/// Rotation threshold in bytes; oversized settings clamp to the largest value.
fn rotation_bytes(section: &Section) -> usize {
    let bytes = section
        .max_size_mb
        .unwrap_or(DEFAULT_MAX_SIZE_MB)
        .saturating_mul(1024 * 1024);
    usize::try_from(bytes).unwrap_or(usize::MAX)
}

fn open_log_file(section: &Section, base_dir: &Path) -> std::io::Result<Option<LogFile>> {
    if section.file.trim().is_empty() {
        return Ok(None);
    }

    let path = resolve_log_path(&section.file, base_dir);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let backups = section.max_backups.unwrap_or(DEFAULT_MAX_BACKUPS);
    let rotation = FileRotate::new(
        &path,
        AppendTimestamp::default(FileLimit::MaxFiles(backups)),
        ContentLimit::BytesSurpassed(rotation_bytes(section)),
        Compression::None,
        #[cfg(unix)]
        None,
    );

    Ok(Some(LogFile(Arc::new(Mutex::new(rotation)))))
}

// -------- layer assembly --------

/// Logging sections split into the catch-all and the named subsystems.
struct Plan<'a> {
    default: Option<&'a Section>,
    subsystems: Vec<(&'a str, &'a Section)>,
}

impl<'a> Plan<'a> {
    fn from_config(cfg: &'a LoggingConfig) -> Self {
        let mut subsystems: Vec<(&str, &Section)> = cfg
            .iter()
            .filter(|(name, _)| name.as_str() != DEFAULT_SECTION)
            .map(|(name, section)| (name.as_str(), section))
            .collect();
        // Longest prefix first so nested subsystems win over their parents.
        subsystems.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then(a.0.cmp(b.0)));

        Self {
            default: cfg.get(DEFAULT_SECTION),
            subsystems,
        }
    }

    fn subsystem_names(&self) -> Vec<String> {
        self.subsystems.iter().map(|(n, _)| n.to_string()).collect()
    }

    fn targets(&self, level_of: impl Fn(&Section) -> &str, needs_file: bool) -> Targets {
        self.subsystems
            .iter()
            .filter(|(_, s)| !needs_file || !s.file.trim().is_empty())
            .filter_map(|&(name, s)| parse_level(level_of(s)).map(|l| (name, l)))
            .fold(Targets::new().with_default(LevelFilter::OFF), |t, (name, l)| {
                t.with_target(name, LevelFilter::from_level(l))
            })
    }

    fn file_router(&self, base_dir: &Path) -> FileRouter {
        let mut router = FileRouter::default();
        if let Some(section) = self.default {
            router.default = open_or_report(DEFAULT_SECTION, section, base_dir);
        }
        for (name, section) in &self.subsystems {
            if let Some(file) = open_or_report(name, section, base_dir) {
                router.subsystems.insert(name.to_string(), file);
            }
        }
        router
    }
}

fn open_or_report(name: &str, section: &Section, base_dir: &Path) -> Option<LogFile> {
    match open_log_file(section, base_dir) {
        Ok(file) => file,
        Err(e) => {
            // The subscriber is not installed yet, so stderr is the only channel.
            eprintln!("Failed to open log file for '{name}' ({}): {e}", section.file);
            None
        }
    }
}

/// Everything not owned by a named subsystem, up to `max_level`.
fn catch_all(
    subsystems: Vec<String>,
    max_level: Level,
) -> FilterFn<impl Fn(&tracing::Metadata<'_>) -> bool> {
    FilterFn::new(move |meta: &tracing::Metadata<'_>| {
        !subsystems.iter().any(|s| target_in(meta.target(), s)) && *meta.level() <= max_level
    })
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn console_layer() -> fmt::Layer<Registry> {
    fmt::layer()
        .with_ansi(std::io::stdout().is_terminal())
        .with_target(true)
        .with_level(true)
}

type JsonFileLayer =
    fmt::Layer<Registry, fmt::format::JsonFields, fmt::format::Format<fmt::format::Json>, FileRouter>;

fn file_layer(router: FileRouter) -> JsonFileLayer {
    fmt::layer()
        .json()
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_writer(router)
}

fn build_layers(cfg: &LoggingConfig, base_dir: &Path) -> Vec<BoxedLayer> {
    let plan = Plan::from_config(cfg);
    let router = plan.file_router(base_dir);
    let names = plan.subsystem_names();

    let mut layers: Vec<BoxedLayer> = vec![console_layer()
        .with_filter(plan.targets(|s| s.console_level.as_str(), false))
        .boxed()];

    if let Some(level) = plan.default.and_then(|s| parse_level(&s.console_level)) {
        layers.push(
            console_layer()
                .with_filter(catch_all(names.clone(), level))
                .boxed(),
        );
    }

    if router.is_empty() {
        return layers;
    }

    layers.push(
        file_layer(router.clone())
            .with_filter(plan.targets(|s| s.file_level.as_str(), true))
            .boxed(),
    );

    if router.default.is_some() {
        if let Some(level) = plan.default.and_then(|s| parse_level(&s.file_level)) {
            layers.push(file_layer(router).with_filter(catch_all(names, level)).boxed());
        }
    }

    layers
}

/// Initialize the global subscriber from a logging configuration.
///
/// `base_dir` resolves relative log file paths. Calling this more than once is
/// harmless: later calls leave the first subscriber in place.
pub fn init_logging_from_config(cfg: &LoggingConfig, base_dir: &Path) {
    // Bridge `log` → `tracing` before installing the subscriber.
    let _ = tracing_log::LogTracer::init();

    if cfg.is_empty() {
        let _ = fmt().with_target(true).try_init();
        return;
    }

    let _ = Registry::default().with(build_layers(cfg, base_dir)).try_init();
}
