/// Builds the full application around `$db`, with an instant narrator unless
/// a delay is given.
macro_rules! init_app {
    ($db:expr) => {
        init_app!($db, std::time::Duration::ZERO)
    };
    ($db:expr, $delay:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::from($db.clone()))
                .app_data(actix_web::web::Data::new(assiah::Narrator::new($delay)))
                .configure(assiah::configure),
        )
        .await
    };
}

pub(crate) use init_app;
