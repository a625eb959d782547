use crate::middleware::authentication::method;
use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse},
    Error,
};
use futures::{
    future::{FutureExt, LocalBoxFuture},
    task::{Context, Poll},
};
use std::cell::RefCell;
use std::rc::Rc;

pub struct ManagerMiddleware<S> {
    pub service: Rc<RefCell<S>>,
}

impl<S, B> Service<ServiceRequest> for ManagerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = S::Error;
    type Future = LocalBoxFuture<'static, Result<ServiceResponse<B>, Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        if let Ok(service) = self.service.try_borrow_mut() {
            service.poll_ready(ctx)
        } else {
            Poll::Pending
        }
    }

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        async move {
            if let Err(msg) = authenticate(&mut req).await {
                tracing::info!("Continuing without a session: {}", msg);
            }

            let fut = service.borrow_mut().call(req);
            fut.await
        }
        .boxed_local()
    }
}

/// A failed resolution leaves the request anonymous; handlers that need
/// a session decide what to do without one.
async fn authenticate(req: &mut ServiceRequest) -> Result<bool, String> {
    Ok(method::try_oauth(req).await?
        || method::try_cookie(req).await?
        || method::anonym(req)?)
}
