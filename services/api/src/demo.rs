use clap::Args;
use std::sync::Arc;
use walm::application::{
    Application, ApplicationFilter, ApplicationService, SqliteApplicationRepository,
};
use walm::error::AppError;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Number of sample applications to seed
    #[arg(long, default_value_t = 3)]
    pub(crate) count: u16,
}

/// Seed a throwaway in-memory store through the external write path and
/// print the JSON the list endpoint would serve.
pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let repository = Arc::new(SqliteApplicationRepository::connect("sqlite::memory:", 1).await?);
    let service = ApplicationService::new(repository);

    for index in 1..=args.count {
        let application = Application::new(format!("app-{index}"), format!("Demo App {index}"));
        service.insert(&application).await?;
    }

    let applications = service.list(&ApplicationFilter::default()).await?;
    let views: Vec<_> = applications.iter().map(Application::view).collect();

    println!("{}", serde_json::to_string_pretty(&views).unwrap_or_default());
    Ok(())
}
