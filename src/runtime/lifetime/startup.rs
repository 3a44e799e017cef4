//! 启动期组装
//!
//! 存储与 token 服务在这里各构造一次，再以 `web::Data` 交给中间件和 handler。

use std::sync::Arc;

use actix_web::web;
use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::api::jwt::JwtService;
use crate::api::services::{
    AppStartTime, api_routes, json_error_handler, path_error_handler, query_error_handler,
};
use crate::config::{BootstrapConfig, StaticConfig};
use crate::services::{
    AuthService, EmployeeService, ReportService, SettingsService, TrackingService,
};
use crate::storage::{SeaOrmStorage, StorageFactory};
use crate::utils::password::hash_password;

/// 请求体上限
const JSON_LIMIT: usize = 1024 * 1024;

/// 每个 worker 共享的应用状态
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<SeaOrmStorage>,
    pub jwt: Arc<JwtService>,
    pub start_time: AppStartTime,
    auth: web::Data<AuthService>,
    employees: web::Data<EmployeeService>,
    tracking: web::Data<TrackingService>,
    reports: web::Data<ReportService>,
    settings: web::Data<SettingsService>,
}

impl AppState {
    pub fn new(storage: Arc<SeaOrmStorage>, jwt: Arc<JwtService>) -> Self {
        Self {
            auth: web::Data::new(AuthService::new(storage.clone(), jwt.clone())),
            employees: web::Data::new(EmployeeService::new(storage.clone())),
            tracking: web::Data::new(TrackingService::new(storage.clone())),
            reports: web::Data::new(ReportService::new(storage.clone())),
            settings: web::Data::new(SettingsService::new(storage.clone())),
            start_time: AppStartTime::now(),
            storage,
            jwt,
        }
    }

    /// 注册 app data、提取器错误处理和 `/api` 路由
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.storage.clone()))
            .app_data(web::Data::from(self.jwt.clone()))
            .app_data(web::Data::new(self.start_time.clone()))
            .app_data(self.auth.clone())
            .app_data(self.employees.clone())
            .app_data(self.tracking.clone())
            .app_data(self.reports.clone())
            .app_data(self.settings.clone())
            .app_data(
                web::JsonConfig::default()
                    .limit(JSON_LIMIT)
                    .error_handler(json_error_handler),
            )
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .app_data(web::PathConfig::default().error_handler(path_error_handler))
            .service(api_routes());
    }
}

/// 引导管理员不存在时创建，返回是否新建
pub async fn ensure_bootstrap_admin(
    storage: &SeaOrmStorage,
    bootstrap: &BootstrapConfig,
) -> Result<bool> {
    if storage
        .find_admin_by_username(&bootstrap.admin_username)
        .await?
        .is_some()
    {
        debug!("Admin '{}' already exists", bootstrap.admin_username);
        return Ok(false);
    }

    let hash = hash_password(&bootstrap.admin_password)
        .context("Failed to hash bootstrap admin password")?;
    storage
        .create_admin(&bootstrap.admin_username, &hash, &bootstrap.admin_email)
        .await
        .context("Failed to create bootstrap admin")?;

    warn!(
        "Created admin '{}' from bootstrap config, change its password with `reset-admin-password`",
        bootstrap.admin_username
    );
    Ok(true)
}

/// 连接数据库、执行迁移、确保有管理员，构造应用状态
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<AppState> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = StorageFactory::create(&config.database)
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    ensure_bootstrap_admin(&storage, &config.bootstrap).await?;

    let jwt = Arc::new(JwtService::from_config(&config.auth));
    debug!("Token lifetime: {}h", jwt.token_hours());

    let state = AppState::new(storage, jwt);
    info!("Pre-startup completed in {:?}", start_time.elapsed());
    Ok(state)
}
