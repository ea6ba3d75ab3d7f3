use log::LevelFilter;
use log4rs::{
    Config,
    append::{
        console::{ConsoleAppender, Target},
        rolling_file::{
            RollingFileAppender,
            policy::compound::{
                CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
            },
        },
    },
    config::{Appender, Logger, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};

const LOG_SIZE_LIMIT: u64 = 10 * 1024 * 1024; // 10 MB

const LOG_FILE_COUNT: u32 = 3;

const FILE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {l} {t} - {m}\n";

const CONSOLE_PATTERN: &str = "{h({l})} {t} - {m}\n";

pub struct LogSettings {
    pub file_path: String,
    pub archive_pattern: String,
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self {
            file_path: std::env::var("LOG_FILE_PATH").expect("LOG_FILE_PATH must be set"),
            archive_pattern: std::env::var("LOG_ARCHIVE_PATTERN")
                .expect("LOG_ARCHIVE_PATTERN must be set"),
        }
    }
}

pub fn init_logger(settings: &LogSettings) {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(CONSOLE_PATTERN)))
        .build();

    let trigger = SizeTrigger::new(LOG_SIZE_LIMIT);
    let roller = FixedWindowRoller::builder()
        .build(&settings.archive_pattern, LOG_FILE_COUNT)
        .expect("LOG_ARCHIVE_PATTERN must be a valid archive pattern");
    let policy = CompoundPolicy::new(Box::new(trigger), Box::new(roller));

    let logfile = RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(FILE_PATTERN)))
        .build(&settings.file_path, Box::new(policy))
        .expect("Failed to open log file");

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("logfile", Box::new(logfile)),
        )
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Info)))
                .build("stderr", Box::new(stderr)),
        )
        // sqlx statement logging floods the debug file
        .logger(Logger::builder().build("sqlx", LevelFilter::Warn))
        .logger(Logger::builder().build("sea_orm", LevelFilter::Info))
        .build(
            Root::builder()
                .appender("logfile")
                .appender("stderr")
                .build(LevelFilter::Trace),
        )
        .expect("Invalid logger configuration");

    let _handle = log4rs::init_config(config).expect("Failed to initialize logger");
}
