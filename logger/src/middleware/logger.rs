use actix_web::http::{Method, StatusCode};
use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use colored::{ColoredString, Colorize};
use futures::future::{LocalBoxFuture, Ready, ready};
use log::info;
use std::rc::Rc;
use std::time::Instant;

/// Logs one line per request: status, method, path and latency.
pub struct LoggerMiddleware {
    enabled: bool,
}

impl LoggerMiddleware {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl<S, B> Transform<S, ServiceRequest> for LoggerMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = LoggerMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(LoggerMiddlewareService {
            service: Rc::new(service),
            enabled: self.enabled,
        }))
    }
}

pub struct LoggerMiddlewareService<S> {
    service: Rc<S>,
    enabled: bool,
}

impl<S, B> Service<ServiceRequest> for LoggerMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let fut = self.service.call(req);
        if !self.enabled {
            return Box::pin(fut);
        }

        let started = Instant::now();
        Box::pin(async move {
            let res = fut.await?;
            let method = res.request().method().clone();
            let path = res.request().path().to_string();
            let query = res.request().query_string().to_string();

            info!(
                "[{}] {} {}{} {}",
                colored_status(res.status()),
                colored_method(&method),
                path.bright_white(),
                if query.is_empty() {
                    String::new()
                } else {
                    format!("?{}", query)
                },
                format!("({}ms)", started.elapsed().as_millis()).bright_black(),
            );

            Ok(res)
        })
    }
}

fn colored_status(status: StatusCode) -> ColoredString {
    let code = status.as_u16().to_string();
    match status.as_u16() {
        200..=299 => code.green(),
        300..=399 => code.yellow(),
        400..=499 => code.bright_red(),
        _ => code.red(),
    }
}

fn colored_method(method: &Method) -> ColoredString {
    let name = method.as_str();
    match *method {
        Method::GET => name.blue(),
        Method::POST => name.yellow(),
        Method::PUT => name.purple(),
        Method::DELETE => name.red(),
        _ => name.normal(),
    }
}
