use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_port::*;
use crate::infra_memory::*;
use crate::infra_mysql::*;
use crate::infra_redis::*;
use crate::logger::*;
use crate::settings::Settings;
use chrono::Duration;
use sqlx::MySqlPool;
use std::sync::Arc;

pub struct Server {
    pub auth_service: Arc<dyn AuthService>,
    pub company_service: Arc<dyn CompanyService>,
    pub job_service: Arc<dyn JobService>,
    pub cache: Arc<CacheReader>,
    pub invalidator: Arc<CacheInvalidator>,
}

struct Repos {
    token_repo: Arc<dyn TokenRepo>,
    company_repo: Arc<dyn CompanyRepo>,
    job_repo: Arc<dyn JobRepo>,
}

impl Server {
    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let repos = match settings.storage.backend.as_str() {
            "memory" => Repos {
                token_repo: Arc::new(MemoryTokenRepo::new()),
                company_repo: Arc::new(MemoryCompanyRepo::new()),
                job_repo: Arc::new(MemoryJobRepo::new()),
            },
            "mysql" => {
                let dsn = settings
                    .storage
                    .mysql_dsn
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("storage.mysql_dsn is required"))?;
                let pool = MySqlPool::connect(dsn).await?;
                Repos {
                    token_repo: Arc::new(MySqlTokenRepo::new(pool.clone())),
                    company_repo: Arc::new(MySqlCompanyRepo::new(pool.clone())),
                    job_repo: Arc::new(MySqlJobRepo::new(pool)),
                }
            }
            other => return Err(anyhow::anyhow!("Unknown storage backend: {}", other)),
        };

        let cache_store: Arc<dyn CacheStore> = match settings.cache.backend.as_str() {
            "memory" => Arc::new(MemoryCacheStore::new()),
            "redis" => {
                let dsn = settings
                    .cache
                    .redis_dsn
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("cache.redis_dsn is required"))?;
                let client = redis::Client::open(dsn)?;
                let manager = client.get_connection_manager().await?;
                Arc::new(RedisCacheStore::new(manager, settings.cache.prefix.clone()))
            }
            other => return Err(anyhow::anyhow!("Unknown cache backend: {}", other)),
        };

        let envelope = EnvelopeCodec::from_base64(&settings.auth.envelope_key)?;
        let token_service: Arc<dyn TokenService> = Arc::new(TokenManager::new(
            repos.token_repo.clone(),
            envelope,
            TokenConfig {
                access_secret: settings.auth.access_secret.clone().into_bytes(),
                access_ttl: Duration::seconds(settings.auth.access_ttl_secs),
                refresh_ttl: Duration::seconds(settings.auth.refresh_ttl_secs),
            },
        ));

        let credential_hasher: Arc<dyn CredentialHasher> = Arc::new(Argon2PasswordHasher);
        let mailer: Arc<dyn Mailer> = Arc::new(LogMailer);

        let auth_service: Arc<dyn AuthService> = Arc::new(RealAuthService::new(
            repos.company_repo.clone(),
            token_service,
            credential_hasher,
            mailer,
            AuthConfig {
                email_verification_ttl: Duration::seconds(
                    settings.auth.email_verification_ttl_secs,
                ),
                reset_password_ttl: Duration::seconds(settings.auth.reset_password_ttl_secs),
            },
        ));

        let company_service: Arc<dyn CompanyService> =
            Arc::new(RealCompanyService::new(repos.company_repo));
        let job_service: Arc<dyn JobService> = Arc::new(RealJobService::new(repos.job_repo));

        let cache = Arc::new(CacheReader::new(
            cache_store.clone(),
            settings.cache.ttl_secs,
        ));
        let invalidator = Arc::new(CacheInvalidator::new(cache_store));

        info!("server started");

        Ok(Self {
            auth_service,
            company_service,
            job_service,
            cache,
            invalidator,
        })
    }
}
