pub mod db;
pub mod server;

#[derive(Debug)]
pub enum Action {
    Server(server::Args),
    Db(db::Args),
}
