use std::sync::Arc;

use chrono::Utc;

use facturador::application::services::{
    BillingService, PollConfig, ProvisioningWorkflow,
};
use facturador::config::Settings;
use facturador::domain::NewAccount;
use facturador::infrastructure::cache::ResponseCache;
use facturador::infrastructure::http::{
    ApiAccountBackend, ApiJobBackend, ApiProvisioningBackend, StaticSessionProvider,
};
use facturador::infrastructure::observability::{init_tracing, TracingConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env();
    init_tracing(TracingConfig {
        environment: settings.environment.to_string(),
        level: settings.logging.level.clone(),
        json_format: settings.logging.enable_json,
    });

    let session = Arc::new(StaticSessionProvider::from_env());
    let job_backend = Arc::new(ApiJobBackend::new(
        &settings.api.base_url,
        Arc::clone(&session) as _,
    ));
    let account_backend = Arc::new(ApiAccountBackend::new(
        &settings.api.base_url,
        Arc::clone(&session) as _,
    ));

    if let Some(request) = provisioning_request_from_env() {
        let provisioning_backend = Arc::new(ApiProvisioningBackend::new(
            &settings.api.base_url,
            &settings.api.scraper_url,
            &settings.api.redeploy_url,
            Arc::clone(&session) as _,
        ));
        let workflow = ProvisioningWorkflow::new(
            Arc::clone(&account_backend) as _,
            provisioning_backend,
            PollConfig {
                max_polls: settings.provisioning.max_polls,
                delay: settings.provisioning.poll_delay(),
            },
        );
        let account = workflow.run(&request).await?;
        tracing::info!(account_id = %account.id, tax_id = %account.tax_id, "Account ready");
    }

    let cache = Arc::new(ResponseCache::with_default_ttl(settings.cache.ttl()));
    let _sweeper = cache.spawn_sweeper();

    let mut billing = BillingService::new(job_backend, account_backend, Arc::clone(&cache));

    let now = Utc::now();
    billing.refresh(now, false).await?;

    for summary in billing.summaries(now) {
        tracing::info!(
            account_id = %summary.account_id,
            title = %summary.title_label,
            jobs = summary.job_count,
            total = %summary.total_amount,
            completed = %summary.completed_amount,
            outstanding = %summary.outstanding_amount,
            active = summary.is_current_period,
            "Current billing"
        );
    }
    for summary in billing.historical_summaries(now) {
        tracing::info!(
            account_id = %summary.account_id,
            title = %summary.title_label,
            jobs = summary.job_count,
            total = %summary.total_amount,
            "Historical billing"
        );
    }

    Ok(())
}

/// A full set of `PROVISION_*` variables requests provisioning a new AFIP
/// account before the billing state is loaded.
fn provisioning_request_from_env() -> Option<NewAccount> {
    Some(NewAccount {
        display_name: std::env::var("PROVISION_NAME").ok()?,
        tax_id: std::env::var("PROVISION_TAX_ID").ok()?,
        credential_secret: std::env::var("PROVISION_SECRET").ok()?,
    })
}
