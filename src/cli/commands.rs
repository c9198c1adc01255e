use crate::core::models::Mode;
use crate::core::resolver;
use crate::utils::config_loader::{ConfigLoader, CONFIG_FILE_NAME};
use crate::utils::{Logger, PacksmithError, Result, Timer};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "packsmith")]
#[command(about = "Packsmith - mode-aware build plans for web asset pipelines")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a build plan and print it
    Plan {
        /// Root directory
        #[arg(short, long, default_value = ".")]
        root: String,
        /// Build mode (development | production; unknown values fall back to development)
        #[arg(short, long)]
        mode: Option<String>,
        /// Output directory override
        #[arg(long)]
        dist: Option<String>,
        /// Write the plan to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Resolve the production plan and write the engine hand-off artifact
    Build {
        /// Root directory
        #[arg(short, long, default_value = ".")]
        root: String,
        /// Build mode (default: production)
        #[arg(short, long)]
        mode: Option<String>,
        /// Output directory override
        #[arg(long)]
        dist: Option<String>,
        /// Plan artifact path (default: <dist>/buildplan.json)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Resolve the development plan with dev-server settings
    Dev {
        /// Root directory
        #[arg(short, long, default_value = ".")]
        root: String,
        /// Dev-server port override
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Write an example packsmith.config.json
    Init {
        /// Root directory
        #[arg(short, long, default_value = ".")]
        root: String,
    },
    /// Show resolver information
    Info,
}

pub struct CliHandler;

impl CliHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn run(&self) -> Result<()> {
        // Initialize logging
        Logger::init();

        let cli = Cli::parse();

        match cli.command {
            Commands::Plan {
                root,
                mode,
                dist,
                out,
            } => self.handle_plan_command(&root, mode.as_deref(), dist.as_deref(), out),
            Commands::Build {
                root,
                mode,
                dist,
                out,
            } => self.handle_build_command(&root, mode.as_deref(), dist.as_deref(), out),
            Commands::Dev { root, port } => self.handle_dev_command(&root, port),
            Commands::Init { root } => self.handle_init_command(&root),
            Commands::Info => self.handle_info_command(),
        }
    }

    fn handle_plan_command(
        &self,
        root: &str,
        mode: Option<&str>,
        dist: Option<&str>,
        out: Option<PathBuf>,
    ) -> Result<()> {
        let root_dir = PathBuf::from(root);
        let file_config = ConfigLoader::load_from_file(&root_dir)?;

        // Mode precedence: CLI > config file > development
        let mode_arg = mode
            .map(str::to_string)
            .or_else(|| file_config.as_ref().and_then(|c| c.mode.clone()))
            .unwrap_or_else(|| "development".to_string());
        let mode = Mode::from_arg(&mode_arg);

        let paths = ConfigLoader::merge_with_cli(file_config, &root_dir, dist, None);
        let plan = resolver::resolve(mode, &paths)?;
        let json = plan.to_json_pretty()?;

        match out {
            Some(path) => {
                Self::write_plan(&path, &json)?;
                Logger::plan_written(&path.display().to_string());
            }
            None => println!("{}", json),
        }

        Ok(())
    }

    fn handle_build_command(
        &self,
        root: &str,
        mode: Option<&str>,
        dist: Option<&str>,
        out: Option<PathBuf>,
    ) -> Result<()> {
        let root_dir = PathBuf::from(root);
        let file_config = ConfigLoader::load_from_file(&root_dir)?;
        let mode = Mode::from_arg(mode.unwrap_or("production"));

        Logger::resolve_start(mode.as_str(), root);
        let timer = Timer::start("plan resolution");

        let paths = ConfigLoader::merge_with_cli(file_config, &root_dir, dist, None);
        let plan = resolver::resolve(mode, &paths)?;

        let out = out.unwrap_or_else(|| paths.dist.join("buildplan.json"));
        Self::write_plan(&out, &plan.to_json_pretty()?)?;

        Logger::plan_summary(
            plan.entry.len(),
            plan.rules.len(),
            plan.plugins.len(),
            plan.optimization.minimizers.len(),
        );

        println!();
        println!(
            "  {} {} {}",
            "plan".bright_black(),
            out.display().to_string().bright_cyan(),
            format!("({} rules, {} plugins)", plan.rules.len(), plan.plugins.len()).bright_black()
        );
        println!(
            "  {} {} {}",
            "output".bright_black(),
            plan.output.filename.as_str().bright_white(),
            if plan.output.filename.has_hash_token() {
                "(cache busting)".bright_black()
            } else {
                "".normal()
            }
        );
        for plugin in &plan.plugins {
            println!("  {} {}", "+".bright_black(), plugin.kind().bright_white());
        }
        println!();
        println!(
            "  {} resolved in {}",
            "✓".bright_green(),
            format!("{:.0}ms", timer.elapsed().as_secs_f64() * 1000.0)
                .bright_white()
                .bold()
        );

        Ok(())
    }

    fn handle_dev_command(&self, root: &str, port: Option<u16>) -> Result<()> {
        let root_dir = PathBuf::from(root);
        let file_config = ConfigLoader::load_from_file(&root_dir)?;
        let port_hint = file_config.as_ref().and_then(|c| c.port);

        tracing::info!("🧩 Packsmith - Development Plan");
        tracing::info!("═══════════════════════════════════════");
        tracing::info!("📁 Root: {}", root);

        let paths = ConfigLoader::merge_with_cli(file_config, &root_dir, None, None);
        let mut plan = resolver::resolve(Mode::Development, &paths)?;

        // Port precedence: CLI > config file > plan default
        if let Some(server) = plan.dev_server.as_mut() {
            server.port = port.or(port_hint).unwrap_or(server.port);
        }

        let out = paths.dist.join("buildplan.json");
        Self::write_plan(&out, &plan.to_json_pretty()?)?;

        if let Some(server) = &plan.dev_server {
            tracing::info!("🌐 Port: {}", server.port);
            tracing::info!("🔥 Hot reload: {}", on_off(server.hot));
            tracing::info!("🗜️  Compression: {}", on_off(server.compress));
            tracing::info!("👀 Watch content base: {}", on_off(server.watch_content_base));
            tracing::info!("📂 Content base: {}", server.content_base.display());
        }
        tracing::info!("");
        tracing::info!("📦 Plan written to {}", out.display());
        tracing::info!("✨ Hand the plan to your dev server to start serving");

        Ok(())
    }

    fn handle_init_command(&self, root: &str) -> Result<()> {
        let config_path = Path::new(root).join(CONFIG_FILE_NAME);

        if config_path.exists() {
            return Err(PacksmithError::config(format!(
                "{} already exists",
                config_path.display()
            )));
        }

        std::fs::write(&config_path, ConfigLoader::generate_example())?;
        tracing::info!("✅ Wrote {}", config_path.display());

        Ok(())
    }

    fn handle_info_command(&self) -> Result<()> {
        tracing::info!("🦀 Packsmith v{}", env!("CARGO_PKG_VERSION"));
        tracing::info!("══════════════════════════════════════");
        tracing::info!("🧩 Mode-aware build plans for web asset pipelines");
        tracing::info!("");
        tracing::info!("🏗️  Plan sections:");
        tracing::info!("  • Entry points and hashed output naming");
        tracing::info!("  • Transform rules (babel, css/postcss, sass, file loaders)");
        tracing::info!("  • Plugin list (html, copy, css-extract, compression, analyzer)");
        tracing::info!("  • Chunk splitting and minimizers");
        tracing::info!("  • Dev-server settings (development mode)");
        tracing::info!("");
        tracing::info!("🎛️  Modes: development (default), production");
        tracing::info!("📄 Config: {} (optional)", CONFIG_FILE_NAME);

        Ok(())
    }

    fn write_plan(path: &Path, json: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, json)?;
        Ok(())
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}
