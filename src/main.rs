//! `sass-serve`: a static file server that compiles stylesheets on demand.
//!
//! ```text
//! GET /styles/app.css
//!     → sass middleware (compile <src>/app.scss if stale)
//!     → ServeDir(<static root>) for everything else
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use sass_middleware::config::schema::Browsers;
use sass_middleware::config::{read_config, ServeConfig};
use sass_middleware::http::{build_router, server};
use sass_middleware::observability::init_tracing;
use sass_middleware::SassMiddleware;

#[derive(Parser)]
#[command(name = "sass-serve")]
#[command(about = "Serve static files and compile Sass/SCSS stylesheets on demand", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Source root holding .scss/.sass files.
    #[arg(long)]
    src: Option<PathBuf>,

    /// Output root for compiled CSS (defaults to --src).
    #[arg(long)]
    css: Option<PathBuf>,

    /// Address to listen on.
    #[arg(short, long)]
    bind: Option<String>,

    /// Directory served for non-stylesheet requests (defaults to the CSS root).
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// URL prefix stylesheets are served under.
    #[arg(long)]
    prefix: Option<String>,

    /// Source extension: .scss or .sass.
    #[arg(long)]
    extname: Option<String>,

    /// Cache-Control max-age in seconds.
    #[arg(long)]
    max_age: Option<u64>,

    /// Browserslist query for vendor prefixes (repeatable).
    #[arg(long)]
    browsers: Vec<String>,

    /// Gzip compiled responses and write .css.gz files.
    #[arg(long)]
    gzip: bool,

    /// Recompile on every request.
    #[arg(long)]
    force: bool,

    /// Compile every source file at startup.
    #[arg(long)]
    init: bool,

    /// Write .css.map files when the engine produces them.
    #[arg(long)]
    source_map: bool,
}

impl Cli {
    /// Layer command-line flags over the file configuration.
    fn apply(self, config: &mut ServeConfig) {
        let sass = &mut config.sass;
        if let Some(src) = self.src {
            sass.src = Some(src);
        }
        if let Some(css) = self.css {
            sass.css = Some(css);
        }
        if let Some(prefix) = self.prefix {
            sass.prefix = Some(prefix);
        }
        if let Some(extname) = self.extname {
            sass.extname = Some(extname);
        }
        if let Some(max_age) = self.max_age {
            sass.max_age = max_age;
        }
        if !self.browsers.is_empty() {
            sass.browsers = Some(Browsers::Many(self.browsers));
        }
        sass.gzip |= self.gzip;
        sass.force |= self.force;
        sass.init |= self.init;
        sass.source_map |= self.source_map;

        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
        }
        if let Some(dir) = self.static_dir {
            config.static_files.root = Some(dir);
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut cli = Cli::parse();

    let mut config = match cli.config.take() {
        Some(path) => read_config(&path)?,
        None => ServeConfig::default(),
    };
    cli.apply(&mut config);

    init_tracing(&format!(
        "sass_middleware={level},sass_serve={level},tower_http={level}",
        level = config.observability.log_level
    ));

    tracing::info!("sass-serve v{} starting", env!("CARGO_PKG_VERSION"));

    let sass = SassMiddleware::new(config.sass)?;
    let static_root = config
        .static_files
        .root
        .unwrap_or_else(|| sass.settings().css_root.clone());

    tracing::info!(
        src = %sass.settings().src_root.display(),
        css = %sass.settings().css_root.display(),
        prefix = %sass.settings().prefix,
        static_root = %static_root.display(),
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let router = build_router(sass, &static_root);
    server::run(router, listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
