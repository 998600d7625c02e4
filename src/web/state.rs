use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::globe::{FlyTo, FlyToTarget, Orthographic};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<Catalog>,
    pub globe: Arc<RwLock<GlobeState>>,
}

/// Projection shared by all clients plus the transition in flight, if any.
#[derive(Debug)]
pub struct GlobeState {
    projection: Orthographic,
    fly_to: Option<FlyTo>,
}

impl GlobeState {
    pub fn new(projection: Orthographic) -> Self {
        Self {
            projection,
            fly_to: None,
        }
    }

    pub fn projection(&self) -> &Orthographic {
        &self.projection
    }

    pub fn is_flying(&self) -> bool {
        self.fly_to.is_some()
    }

    pub fn start_fly_to(
        &mut self,
        target: FlyToTarget,
        now: DateTime<Utc>,
        duration: chrono::Duration,
    ) {
        // A new target restarts from wherever the globe is right now
        self.advance(now);
        self.fly_to = Some(FlyTo::new(&self.projection, target, now, duration));
    }

    /// Move the projection along the active transition by wall-clock time.
    /// The transition is dropped once it reaches its end.
    pub fn advance(&mut self, now: DateTime<Utc>) {
        let Some(fly_to) = &self.fly_to else {
            return;
        };
        let progress = fly_to.progress_at(now);
        fly_to.apply(&mut self.projection, progress);
        if progress >= 1.0 {
            self.fly_to = None;
        }
    }

    /// Projection at `progress` along the active transition, leaving the
    /// shared state untouched.
    pub fn preview(&self, progress: f64) -> Orthographic {
        let mut projection = self.projection.clone();
        if let Some(fly_to) = &self.fly_to {
            fly_to.apply(&mut projection, progress);
        }
        projection
    }
}
