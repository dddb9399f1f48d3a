use crate::{
    api::{adjustment, attendance, department, employee, hold, payroll, position, shift},
    config::Config,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::scope("/employee")
                    // /employee
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    )
                    // /employee/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(employee::update_employee))
                            .route(web::get().to(employee::get_employee))
                            .route(web::delete().to(employee::deactivate_employee)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    .service(
                        web::resource("")
                            .route(web::get().to(attendance::list_attendance)),
                    )
                    .service(
                        web::resource("/clock-in")
                            .route(web::post().to(attendance::clock_in)),
                    )
                    .service(
                        web::resource("/clock-out")
                            .route(web::put().to(attendance::clock_out)),
                    ),
            )
            .service(
                web::scope("/payroll")
                    .service(
                        web::resource("")
                            .route(web::get().to(payroll::list_payrolls)),
                    )
                    .service(
                        web::resource("/process")
                            .route(web::post().to(payroll::process_payroll)),
                    )
                    .service(
                        web::resource("/process-all")
                            .route(web::post().to(payroll::process_all_payrolls)),
                    )
                    .service(
                        web::resource("/preview")
                            .route(web::post().to(payroll::preview_payrolls)),
                    )
                    // /payroll/{id}
                    .service(web::resource("/{id}").route(web::get().to(payroll::get_payroll)))
                    .service(
                        web::resource("/{id}/notes")
                            .route(web::put().to(payroll::append_payroll_note)),
                    ),
            )
            .service(
                web::scope("/adjustment")
                    .service(
                        web::resource("")
                            .route(web::post().to(adjustment::create_adjustment))
                            .route(web::get().to(adjustment::list_adjustments)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::delete().to(adjustment::delete_adjustment)),
                    )
                    .service(
                        web::resource("/{id}/approve")
                            .route(web::put().to(adjustment::approve_adjustment)),
                    )
                    .service(
                        web::resource("/{id}/reject")
                            .route(web::put().to(adjustment::reject_adjustment)),
                    ),
            )
            .service(
                web::scope("/hold")
                    .service(
                        web::resource("")
                            .route(web::post().to(hold::create_hold))
                            .route(web::get().to(hold::list_holds)),
                    )
                    .service(web::resource("/{id}").route(web::delete().to(hold::delete_hold)))
                    .service(
                        web::resource("/{id}/release").route(web::put().to(hold::release_hold)),
                    ),
            )
            .service(
                web::scope("/shift").service(
                    web::resource("")
                        .route(web::post().to(shift::create_shift))
                        .route(web::get().to(shift::list_shifts)),
                ),
            )
            .service(
                web::scope("/position")
                    .service(
                        web::resource("")
                            .route(web::post().to(position::create_position))
                            .route(web::get().to(position::list_positions)),
                    )
                    .service(
                        web::resource("/{id}").route(web::put().to(position::update_position)),
                    ),
            )
            .service(
                web::scope("/department").service(
                    web::resource("")
                        .route(web::post().to(department::create_department))
                        .route(web::get().to(department::list_departments)),
                ),
            ),
    );
}
