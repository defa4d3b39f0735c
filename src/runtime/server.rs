use actix_web::dev::Server;
use actix_web::{App, HttpServer, middleware, web};

use crate::api::services;
use crate::config::ServerConfig;
use crate::runtime::startup::StartupContext;

/// 注册全部路由
///
/// 同一 scope 内静态路径必须先于 `/{id}` 注册
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // 健康检查
        .service(
            web::scope("/health")
                .route("", web::get().to(services::health_check))
                .route("/ready", web::get().to(services::readiness))
                .route("/live", web::get().to(services::liveness)),
        )
        // 员工
        .service(
            web::scope("/employees")
                .service(
                    web::resource(["", "/"])
                        .route(web::get().to(services::employee_list))
                        .route(web::post().to(services::employee_create)),
                )
                .route(
                    "/user/{user_id}",
                    web::get().to(services::employee_get_by_user),
                )
                .service(
                    web::resource("/{id}")
                        .route(web::get().to(services::employee_get))
                        .route(web::put().to(services::employee_update))
                        .route(web::delete().to(services::employee_delete)),
                ),
        )
        // 考勤
        .service(
            web::scope("/attendances")
                .service(
                    web::resource(["", "/"])
                        .route(web::get().to(services::attendance_list))
                        .route(web::post().to(services::attendance_create)),
                )
                .route("/clock-in", web::post().to(services::attendance_clock_in))
                .route("/clock-out", web::post().to(services::attendance_clock_out))
                .route(
                    "/employee/{employee_id}",
                    web::get().to(services::attendance_list_by_employee),
                )
                .service(
                    web::resource("/{id}")
                        .route(web::get().to(services::attendance_get))
                        .route(web::put().to(services::attendance_update))
                        .route(web::delete().to(services::attendance_delete)),
                ),
        )
        // 仪表盘
        .service(
            web::scope("/dashboard")
                .route(
                    "/total-employees",
                    web::get().to(services::dashboard_total_employees),
                )
                .route(
                    "/attendance",
                    web::get().to(services::dashboard_attendance_summary),
                ),
        );
}

/// 绑定端口并创建 HTTP 服务器，信号由调用方处理
pub fn build_server(ctx: &StartupContext, config: &ServerConfig) -> std::io::Result<Server> {
    let bind_addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting HTTP server on {}", bind_addr);

    let db = ctx.db.clone();
    let storage = ctx.storage.clone();

    let server = HttpServer::new(move || {
        App::new()
            // 共享状态
            .app_data(web::Data::new(db.clone()))
            .app_data(web::Data::new(storage.clone()))
            // 中间件
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .wrap(middleware::DefaultHeaders::new().add(("X-Version", env!("CARGO_PKG_VERSION"))))
            .configure(configure_routes)
    })
    .disable_signals()
    .bind(&bind_addr)?
    .run();

    Ok(server)
}
