use anyhow::anyhow;
use friendnet::application_impl::*;
use friendnet::domain_port::*;
use friendnet::infra_memory::*;
use friendnet::logger::*;
use friendnet::settings::*;
use friendnet::shell;
use std::sync::Arc;
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logger = Logger::new_bootstrap()?;

    let project_settings = parse_settings(cli.settings.as_deref())?;
    info!(?project_settings);
    let logger_config = LogConfig {
        filter: project_settings.log.filter.clone(),
    };
    logger.reload_from_config(&logger_config)?;

    let store = match project_settings.repo.seed.as_deref() {
        Some(path) => MemoryAccountRepo::from_snapshot(path)?,
        None => MemoryAccountRepo::new(),
    };
    let store: Arc<dyn AccountRepo> = Arc::new(store);
    let mut spy = None;
    let account_repo: Arc<dyn AccountRepo> = match project_settings.repo.backend.as_str() {
        "memory" => store,
        "spy" => {
            let recorder = Arc::new(SpyAccountRepo::new(store));
            spy = Some(recorder.clone());
            recorder
        }
        other => return Err(anyhow!("Unknown repo backend: {}", other)),
    };

    let service = RealSocialNetworkService::new(account_repo);
    let mut stdout = tokio::io::stdout();
    match cli.script.as_deref() {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .map_err(|e| anyhow!("open script {path}: {e}"))?;
            shell::run(&service, BufReader::new(file), &mut stdout).await?;
        }
        None => {
            shell::run(&service, BufReader::new(tokio::io::stdin()), &mut stdout).await?;
        }
    }

    if let Some(spy) = spy {
        info!(
            saves = spy.saves(),
            updates = spy.updates(),
            deletes = spy.deletes(),
            "account repo calls"
        );
    }
    info!("shell finished");
    Ok(())
}
