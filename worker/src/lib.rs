pub mod controller {
    pub mod health {
        pub mod routes;
    }
    pub mod notification {
        pub mod routes;
    }
}

pub mod infra {
    pub mod error;
}

pub mod routes;
pub mod state;
