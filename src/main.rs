use anyhow::{bail, Context};
use bfc_logo_grid::async_api::{Worker, WorkerConfig};
use bfc_logo_grid::embed::embed_snippet;
use bfc_logo_grid::export::ExportRequest;
use bfc_logo_grid::persist::{GitHubConfig, GitHubStore};
use bfc_logo_grid::rendering::layout::{compute_render_plan, LayoutOptions};
use bfc_logo_grid::rendering::raster::FileLogoLoader;
use bfc_logo_grid::{Dashboard, FixedSize, GridConfig, MembersDocument, Mode, Ratio};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "bfc-logo-grid",
    version,
    about = "Preview, export and edit the BFC member logo grid"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the render plan as JSON
    Plan {
        #[arg(long, default_value = "members.json")]
        data: PathBuf,
        #[arg(long, value_enum, default_value_t = Ratio::Landscape)]
        ratio: Ratio,
        #[arg(long, value_enum, default_value_t = Mode::Tiered)]
        mode: Mode,
        /// Fixed render width in pixels (requires --height)
        #[arg(long, requires = "height")]
        width: Option<u32>,
        #[arg(long, requires = "width")]
        height: Option<u32>,
        /// Prefix for relative logo paths
        #[arg(long, default_value = "")]
        base_url: String,
    },
    /// Render a fixed-size PNG
    Export {
        #[arg(long, default_value = "members.json")]
        data: PathBuf,
        #[arg(long, value_enum, default_value_t = Ratio::Landscape)]
        ratio: Ratio,
        #[arg(long, value_enum, default_value_t = Mode::Tiered)]
        mode: Mode,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// Directory relative logo paths are read from (defaults to the data file's directory)
        #[arg(long)]
        logos_dir: Option<PathBuf>,
    },
    /// Print the embed snippet
    Embed {
        #[arg(long, value_enum, default_value_t = Ratio::Landscape)]
        ratio: Ratio,
        #[arg(long, value_enum, default_value_t = Mode::Tiered)]
        mode: Mode,
        #[arg(long)]
        host: Option<String>,
    },
    /// Print member counts per tier
    Stats {
        #[arg(long, default_value = "members.json")]
        data: PathBuf,
    },
    /// Commit the member file to the GitHub repository
    Save {
        #[arg(long, default_value = "members.json")]
        data: PathBuf,
        #[arg(long, env = "BFC_GITHUB_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },
    /// Check that a token belongs to the repository owner
    ValidateToken {
        #[arg(long, env = "BFC_GITHUB_TOKEN", hide_env_values = true)]
        token: String,
    },
}

fn load(data: &Path) -> anyhow::Result<MembersDocument> {
    MembersDocument::load(data).with_context(|| format!("Failed to load {}", data.display()))
}

fn normalize_base_url(base: &str) -> anyhow::Result<String> {
    let base = base.trim_end_matches('/');
    if base.starts_with("http") {
        url::Url::parse(base).with_context(|| format!("Invalid base URL {}", base))?;
    }
    Ok(base.to_string())
}

fn data_dir(data: &Path) -> PathBuf {
    data.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Plan { data, ratio, mode, width, height, base_url } => {
            let doc = load(&data)?;
            let opts = LayoutOptions {
                ratio,
                mode,
                fixed_size: width.zip(height).map(|(w, h)| FixedSize::new(w, h)),
                base_url: normalize_base_url(&base_url)?,
            };
            let plan = compute_render_plan(&doc.members, &opts);
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        Command::Export { data, ratio, mode, out_dir, logos_dir } => {
            let doc = load(&data)?;
            let logos = logos_dir.unwrap_or_else(|| data_dir(&data));
            let worker = Worker::spawn(WorkerConfig {
                logos: Box::new(FileLogoLoader::new(logos)),
                ..Default::default()
            })
            .await?;
            let request = ExportRequest::new(ratio, mode);
            let result = worker.export(doc.members, request, "").await;
            worker.close().await?;
            match result {
                Ok(img) => {
                    let path = img.write_to_dir(&out_dir)?;
                    log::info!(
                        "Wrote {}x{} export to {} (sha256 {})",
                        img.width,
                        img.height,
                        path.display(),
                        img.digest()
                    );
                }
                Err(e) => {
                    log::error!("Export failed: {}", e);
                    bail!("no file produced");
                }
            }
        }
        Command::Embed { ratio, mode, host } => {
            let host = host.unwrap_or_else(|| GridConfig::default().host_url);
            println!("{}", embed_snippet(host.trim_end_matches('/'), ratio, mode));
        }
        Command::Stats { data } => {
            let dashboard = Dashboard::new(load(&data)?, GridConfig::default());
            println!("Total: {}", dashboard.total());
            for (tier, count) in dashboard.tier_counts() {
                println!("{}: {}", tier.label(), count);
            }
        }
        Command::Save { data, token } => {
            let doc = load(&data)?;
            let worker = Worker::spawn(WorkerConfig { token, ..Default::default() }).await?;
            let result = worker.save(doc).await;
            worker.close().await?;
            let resp = result.context("Save failed")?;
            let sha = resp["content"]["sha"].as_str().unwrap_or("?");
            println!("Saved members.json ({})", sha);
        }
        Command::ValidateToken { token } => {
            let owner = GitHubConfig::default().owner;
            let ok = tokio::task::spawn_blocking(move || {
                GitHubStore::new(GitHubConfig::default(), None)?.validate_token(&token)
            })
            .await??;
            if ok {
                println!("Token is valid for {}", owner);
            } else {
                bail!("Token is not valid for {}", owner);
            }
        }
    }

    Ok(())
}
