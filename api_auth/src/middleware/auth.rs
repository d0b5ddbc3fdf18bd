use std::{future::Future, pin::Pin, rc::Rc};

use actix_session::SessionExt;
use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use common::http::redirect;
use futures::future::{Ready, ok};

use crate::SESSION_USER_KEY;
use crate::dtos::auth::SessionUser;

/// Sends visitors without a signed-in session to the sign-in page.
pub struct AuthMiddleware {
    sign_in_path: Rc<str>,
}

impl AuthMiddleware {
    pub fn new(sign_in_path: &str) -> Self {
        AuthMiddleware {
            sign_in_path: Rc::from(sign_in_path),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
            sign_in_path: self.sign_in_path.clone(),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
    sign_in_path: Rc<str>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let signed_in = req
            .get_session()
            .get::<SessionUser>(SESSION_USER_KEY)
            .ok()
            .flatten()
            .is_some();

        if signed_in {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await.map(|res| res.map_into_boxed_body()) });
        }

        log::debug!("No session for {}, redirecting to sign-in", req.path());
        let response = redirect(&self.sign_in_path);
        Box::pin(async move { Ok(req.into_response(response)) })
    }
}
