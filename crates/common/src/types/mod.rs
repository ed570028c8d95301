use serde::Serialize;

/// Body of the `/health` check.
#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}
