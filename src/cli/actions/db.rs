use crate::cli::actions::Action;
use crate::planetary::store;
use anyhow::Result;

#[derive(Debug)]
pub struct Args {
    pub op: Op,
    pub dsn: String,
}

#[derive(Debug)]
pub enum Op {
    Create,
    Drop,
    Seed,
}

/// Handle the database bootstrap actions
/// # Errors
/// Returns an error if the database is unreachable or a statement fails,
/// seeding twice fails on the users email uniqueness constraint
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Db(args) => {
            let pool = store::connect(&args.dsn).await?;

            match args.op {
                Op::Create => {
                    store::create_schema(&pool).await?;
                    println!("Database created");
                }
                Op::Drop => {
                    store::drop_schema(&pool).await?;
                    println!("Database dropped");
                }
                Op::Seed => {
                    store::seed(&pool).await?;
                    println!("Database seeded!");
                }
            }
        }
        Action::Server(_) => unreachable!("server actions are handled by actions::server"),
    }

    Ok(())
}
