#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::{web, App};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use installation_lookup::{
    auth::{AdminAccount, JwtManager, Role},
    handlers,
    models::{ActivityRecord, CredentialRecord, Customer, HolidayCalendar},
    monitor::AvailabilityMonitor,
    repositories::{SheetError, SheetRepository},
    services::{AdminService, AuthService, AvailabilityEvaluator, CustomerService},
};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";

#[derive(Default)]
pub struct FakeSheetState {
    pub credentials: Vec<CredentialRecord>,
    pub activity: Vec<ActivityRecord>,
    pub customers: Vec<Customer>,
    pub districts: Vec<String>,
    pub searches: Vec<(String, String)>,
    /// When set, every read fails with this message from the sheet script.
    pub remote_failure: Option<String>,
}

/// In-memory stand-in for the spreadsheet service.
pub struct FakeSheetRepository {
    configured: bool,
    pub state: Mutex<FakeSheetState>,
}

impl FakeSheetRepository {
    pub fn new(configured: bool) -> Self {
        Self {
            configured,
            state: Mutex::new(FakeSheetState::default()),
        }
    }

    fn check(&self) -> Result<(), SheetError> {
        if !self.configured {
            return Err(SheetError::NotConfigured);
        }
        match &self.state.lock().unwrap().remote_failure {
            Some(message) => Err(SheetError::Remote(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SheetRepository for FakeSheetRepository {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn authenticate_user(&self, username: &str, password: &str) -> Result<(), SheetError> {
        self.check()?;
        let state = self.state.lock().unwrap();
        if state
            .credentials
            .iter()
            .any(|c| c.username == username && c.password == password)
        {
            Ok(())
        } else {
            Err(SheetError::Remote("Geçersiz sicil no veya şifre".to_string()))
        }
    }

    async fn get_credentials(&self) -> Result<Vec<CredentialRecord>, SheetError> {
        self.check()?;
        Ok(self.state.lock().unwrap().credentials.clone())
    }

    async fn get_user_activity_stats(&self) -> Result<Vec<ActivityRecord>, SheetError> {
        self.check()?;
        Ok(self.state.lock().unwrap().activity.clone())
    }

    async fn add_credential(
        &self,
        credential: &CredentialRecord,
    ) -> Result<Vec<CredentialRecord>, SheetError> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        if state.credentials.iter().any(|c| c.username == credential.username) {
            return Err(SheetError::Remote("Bu sicil no zaten kayıtlı".to_string()));
        }
        state.credentials.push(credential.clone());
        Ok(state.credentials.clone())
    }

    async fn delete_credential(&self, username: &str) -> Result<Vec<CredentialRecord>, SheetError> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let before = state.credentials.len();
        state.credentials.retain(|c| c.username != username);
        if state.credentials.len() == before {
            return Err(SheetError::Remote("Kullanıcı bulunamadı".to_string()));
        }
        Ok(state.credentials.clone())
    }

    async fn update_credential(
        &self,
        original_username: &str,
        updated: &CredentialRecord,
    ) -> Result<Vec<CredentialRecord>, SheetError> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        match state
            .credentials
            .iter_mut()
            .find(|c| c.username == original_username)
        {
            Some(credential) => *credential = updated.clone(),
            None => return Err(SheetError::Remote("Kullanıcı bulunamadı".to_string())),
        }
        Ok(state.credentials.clone())
    }

    async fn find_customer(&self, installation_number: &str) -> Result<Option<Customer>, SheetError> {
        self.check()?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .customers
            .iter()
            .find(|c| c.installation_number == installation_number)
            .cloned())
    }

    async fn log_search(&self, username: &str, installation_number: &str) -> Result<(), SheetError> {
        self.check()?;
        self.state
            .lock()
            .unwrap()
            .searches
            .push((username.to_string(), installation_number.to_string()));
        Ok(())
    }

    async fn get_districts(&self) -> Result<Vec<String>, SheetError> {
        self.check()?;
        Ok(self.state.lock().unwrap().districts.clone())
    }
}

pub fn weekday_morning() -> NaiveDateTime {
    // Wednesday
    NaiveDate::from_ymd_opt(2025, 7, 16)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap()
}

pub fn saturday_morning() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 7, 19)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap()
}

pub fn customer(installation_number: &str) -> Customer {
    Customer {
        installation_number: installation_number.to_string(),
        name: "Ayşe Yılmaz".to_string(),
        phone: "0532 111 22 33".to_string(),
        address: "Atatürk Cad. No: 5 Kadıköy".to_string(),
        latitude: Some("40,9923".to_string()),
        longitude: Some("29,0244".to_string()),
    }
}

pub struct TestApp {
    pub repository: Arc<FakeSheetRepository>,
    pub jwt_manager: JwtManager,
    pub monitor: AvailabilityMonitor,
    admin: AdminAccount,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_repository(FakeSheetRepository::new(true)).await
    }

    pub async fn unconfigured() -> Self {
        Self::with_repository(FakeSheetRepository::new(false)).await
    }

    async fn with_repository(repository: FakeSheetRepository) -> Self {
        {
            let mut state = repository.state.lock().unwrap();
            state.credentials = vec![
                CredentialRecord::new("1001", "pass1"),
                CredentialRecord::new("1002", "pass2"),
                CredentialRecord::new("2001", "pass3"),
            ];
            state.activity = vec![
                ActivityRecord::new("1001", 5, "2025-07-15 09:12"),
                ActivityRecord::new("2001", 12, "2025-07-16 08:01"),
            ];
            state.customers = vec![customer("4001234")];
            state.districts = vec!["Kadıköy".to_string(), "Üsküdar".to_string()];
        }

        let monitor = AvailabilityMonitor::new(
            AvailabilityEvaluator::new(HolidayCalendar::default()),
            Duration::from_secs(60),
        );
        monitor.refresh_at(weekday_morning()).await;

        Self {
            repository: Arc::new(repository),
            jwt_manager: JwtManager::new("test_secret_key"),
            monitor,
            admin: AdminAccount::new(ADMIN_USERNAME, ADMIN_PASSWORD).expect("Failed to hash admin password"),
        }
    }

    pub fn create_app(
        &self,
    ) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let repository: Arc<dyn SheetRepository> = self.repository.clone();

        App::new()
            .app_data(web::Data::new(AuthService::new(repository.clone(), self.admin.clone())))
            .app_data(web::Data::new(CustomerService::new(repository.clone())))
            .app_data(web::Data::new(AdminService::new(repository)))
            .app_data(web::Data::new(self.monitor.clone()))
            .app_data(web::Data::new(self.jwt_manager.clone()))
            .configure(handlers::configure)
    }

    pub fn admin_token(&self) -> String {
        self.jwt_manager
            .generate_token(ADMIN_USERNAME, Role::Admin, true)
            .unwrap()
    }

    pub fn user_token(&self, username: &str, legal_accepted: bool) -> String {
        self.jwt_manager
            .generate_token(username, Role::User, legal_accepted)
            .unwrap()
    }

    pub fn bearer(token: &str) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", token))
    }

    /// Waits for the detached search logger to record `count` entries.
    pub async fn wait_for_searches(&self, count: usize) -> Vec<(String, String)> {
        for _ in 0..50 {
            let searches = self.repository.state.lock().unwrap().searches.clone();
            if searches.len() >= count {
                return searches;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.repository.state.lock().unwrap().searches.clone()
    }
}
