//! Studio flows from configuration to saved image

mod harness;

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use easel_auth::{AuthError, CredentialProvider, IdentityPool};
use easel_config::{AuthorizationType, ConfigOverride, StoredConfig};
use easel_core::Credentials;
use easel_imagegen::{GenerationParameters, ImageGenerator};
use easel_media::MediaStore;
use easel_studio::Studio;
use harness::config::{ConfigBuilder, guest_credentials};
use harness::gateway::{MockGateway, Reply};

struct GuestPool {
    exchanges: AtomicU32,
}

#[async_trait]
impl IdentityPool for GuestPool {
    async fn credentials(&self, _identity_pool_id: &str, _region: &str) -> Result<Credentials, AuthError> {
        self.exchanges.fetch_add(1, Ordering::Relaxed);
        Ok(guest_credentials())
    }
}

fn studio(config: easel_config::Config, pool: Arc<GuestPool>) -> Studio {
    let media = MediaStore::from_config(&config.media);
    Studio::new(config, CredentialProvider::new(pool), ImageGenerator::new(), media)
}

#[tokio::test]
async fn generate_save_and_share() {
    let gateway = MockGateway::start(Reply::Direct).await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let config = ConfigBuilder::new(dir.path())
        .with_gateway(&gateway.base_url(), AuthorizationType::AwsIam)
        .with_identity_pool("us-east-1:pool")
        .build();
    let pool = Arc::new(GuestPool {
        exchanges: AtomicU32::new(0),
    });

    let mut studio = studio(config, Arc::clone(&pool));
    studio.start().await;
    assert_eq!(pool.exchanges.load(Ordering::Relaxed), 1);

    let record = studio
        .generate(&GenerationParameters::with_prompt("a lighthouse in fog"))
        .await
        .unwrap();
    assert_eq!(gateway.signed_count(), 1);

    let saved = studio.save_image(&record).unwrap();
    studio.share_image(&record).unwrap();

    let gallery = studio.gallery().unwrap();
    assert_eq!(gallery.len(), 1);
    assert_eq!(gallery[0].id, saved.asset_id);

    let cache_entries = std::fs::read_dir(dir.path().join("cache")).unwrap().count();
    assert_eq!(cache_entries, 0);
    let outbox_entries = std::fs::read_dir(dir.path().join("outbox")).unwrap().count();
    assert_eq!(outbox_entries, 1);
}

#[tokio::test]
async fn saved_configuration_survives_restart() {
    let gateway = MockGateway::start(Reply::StringBody).await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let pool = Arc::new(GuestPool {
        exchanges: AtomicU32::new(0),
    });

    let configured = ConfigBuilder::new(dir.path())
        .with_gateway(&gateway.base_url(), AuthorizationType::AwsIam)
        .with_identity_pool("us-east-1:pool")
        .build();

    let mut first = studio(ConfigBuilder::new(dir.path()).build(), Arc::clone(&pool));
    first.start().await;
    let stored: StoredConfig = first
        .update_config(ConfigOverride {
            region: Some(configured.region.clone()),
            auth: configured.auth.clone(),
            api: Some(configured.api.clone()),
        })
        .await
        .unwrap();
    assert_eq!(stored.api, configured.api);

    let mut second = studio(ConfigBuilder::new(dir.path()).build(), Arc::clone(&pool));
    second.start().await;

    second
        .generate(&GenerationParameters::with_prompt("a quiet harbor"))
        .await
        .unwrap();

    assert_eq!(gateway.signed_count(), 1);
    assert_eq!(pool.exchanges.load(Ordering::Relaxed), 2);
}
