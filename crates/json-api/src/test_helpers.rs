//! Test helpers.

use std::{
    fmt,
    sync::{Arc, Mutex},
};

use salvo::{affix_state::inject, prelude::*};
use tracing::{
    Subscriber,
    field::{Field, Visit},
    span::{Attributes, Id, Record},
    subscriber::DefaultGuard,
};
use tracing_subscriber::{
    Layer,
    layer::{Context, SubscriberExt},
};

use cart_app::{context::AppContext, domain::carts::MockCartsManager};

use crate::state::State;

pub(crate) fn state_with_carts(carts: MockCartsManager) -> Arc<State> {
    State::from_app_context(AppContext::new(Arc::new(carts)))
}

pub(crate) fn carts_service(carts: MockCartsManager, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_carts(carts)))
            .push(route),
    )
}

/// Span names and recorded `user_id` values seen while a test runs.
#[derive(Debug, Clone, Default)]
pub(crate) struct SpanRecorder {
    names: Arc<Mutex<Vec<String>>>,
    user_ids: Arc<Mutex<Vec<String>>>,
}

impl SpanRecorder {
    /// Install the recorder as the current thread's subscriber.
    pub(crate) fn install(&self) -> DefaultGuard {
        tracing::subscriber::set_default(tracing_subscriber::registry().with(self.clone()))
    }

    pub(crate) fn names(&self) -> Vec<String> {
        self.names.lock().map(|names| names.clone()).unwrap_or_default()
    }

    pub(crate) fn user_ids(&self) -> Vec<String> {
        self.user_ids
            .lock()
            .map(|user_ids| user_ids.clone())
            .unwrap_or_default()
    }
}

impl<S: Subscriber> Layer<S> for SpanRecorder {
    fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
        if let Ok(mut names) = self.names.lock() {
            names.push(attrs.metadata().name().to_string());
        }
    }

    fn on_record(&self, _id: &Id, values: &Record<'_>, _ctx: Context<'_, S>) {
        values.record(&mut UserIdVisitor(&self.user_ids));
    }
}

#[derive(Debug)]
struct UserIdVisitor<'a>(&'a Mutex<Vec<String>>);

impl Visit for UserIdVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "user_id"
            && let Ok(mut user_ids) = self.0.lock()
        {
            user_ids.push(format!("{value:?}"));
        }
    }
}
