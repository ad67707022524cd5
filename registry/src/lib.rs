use std::sync::Arc;

use adapter::{
    ai::{CompletionClient, SuggestionAdapter},
    identity::IdentityProviderClient,
    mail::MailClient,
    redis::RedisClient,
    repository::{
        amenity::AmenityRepositoryImpl, auth::AuthRepositoryImpl,
        health::HealthCheckRepositoryImpl, reservation::ReservationRepositoryImpl,
        room::RoomRepositoryImpl, user::UserRepositoryImpl,
    },
};
use kernel::{
    channel::ErrorChannel,
    repository::{
        amenity::AmenityRepository, auth::AuthRepository, health::HealthCheckRepository,
        reservation::ReservationRepository, room::RoomRepository, user::UserRepository,
    },
    service::{identity::IdentityProvider, mail::MailSender, suggestion::SuggestionService},
    store::{DocumentStore, ReportingStore},
};
use shared::config::AppConfig;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    room_repository: Arc<dyn RoomRepository>,
    reservation_repository: Arc<dyn ReservationRepository>,
    amenity_repository: Arc<dyn AmenityRepository>,
    user_repository: Arc<dyn UserRepository>,
    auth_repository: Arc<dyn AuthRepository>,
    identity_provider: Arc<dyn IdentityProvider>,
    mail_sender: Arc<dyn MailSender>,
    suggestion_service: Arc<dyn SuggestionService>,
    store: ReportingStore,
}

impl AppRegistry {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        channel: ErrorChannel,
        redis_client: Arc<RedisClient>,
        app_config: AppConfig,
    ) -> Self {
        let reporting = ReportingStore::new(store.clone(), channel);
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(store));
        let room_repository = Arc::new(RoomRepositoryImpl::new(reporting.clone()));
        let reservation_repository = Arc::new(ReservationRepositoryImpl::new(reporting.clone()));
        let amenity_repository = Arc::new(AmenityRepositoryImpl::new(reporting.clone()));
        let user_repository = Arc::new(UserRepositoryImpl::new(reporting.clone()));
        let auth_repository = Arc::new(AuthRepositoryImpl::new(
            redis_client.clone(),
            app_config.auth.ttl,
        ));
        let identity_provider = Arc::new(IdentityProviderClient::new(app_config.identity));
        let mail_sender = Arc::new(MailClient::new(app_config.mail));
        let suggestion_service = Arc::new(SuggestionAdapter::new(Arc::new(
            CompletionClient::new(app_config.ai),
        )));
        Self {
            health_check_repository,
            room_repository,
            reservation_repository,
            amenity_repository,
            user_repository,
            auth_repository,
            identity_provider,
            mail_sender,
            suggestion_service,
            store: reporting,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn room_repository(&self) -> Arc<dyn RoomRepository> {
        self.room_repository.clone()
    }

    pub fn reservation_repository(&self) -> Arc<dyn ReservationRepository> {
        self.reservation_repository.clone()
    }

    pub fn amenity_repository(&self) -> Arc<dyn AmenityRepository> {
        self.amenity_repository.clone()
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }

    pub fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }

    pub fn identity_provider(&self) -> Arc<dyn IdentityProvider> {
        self.identity_provider.clone()
    }

    pub fn mail_sender(&self) -> Arc<dyn MailSender> {
        self.mail_sender.clone()
    }

    pub fn suggestion_service(&self) -> Arc<dyn SuggestionService> {
        self.suggestion_service.clone()
    }

    // ライブ購読用。書き込みはリポジトリ経由で行う
    pub fn document_store(&self) -> Arc<dyn DocumentStore> {
        self.store.inner()
    }

    pub fn error_channel(&self) -> ErrorChannel {
        self.store.channel().clone()
    }
}
