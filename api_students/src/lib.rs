use actix_web::web::{self};

pub mod routes {
    pub mod register;
}

pub mod models {
    pub mod draft;
}

pub mod misc {
    pub mod validation;
}

pub mod services {
    pub mod form;
    pub mod registrar;
}

pub mod dtos {
    pub mod register;
}

pub use misc::validation::{ErrorSet, FieldError};
pub use models::draft::{Field, RegistrationDraft};
pub use services::registrar::{LogSubmitter, Registrar, StudentSubmitter};

pub fn mount_students() -> actix_web::Scope {
    web::scope("/students")
        .service(routes::register::post_validate)
        .service(routes::register::post_register)
}
