//! The view state machine.

use std::rc::Rc;

use log::{debug, error, info, warn};
use sr_core::accident::AccidentRecord;
use sr_core::cluster::ClusterId;
use sr_core::geo::{Bounds, LatLng};
use sr_core::route::{CandidateRoute, RouteForm, MAX_ROUTES};
use sr_core::summary::compute_summary;
use sr_core::wire::{ScoreRoutesRequest, ScoreRoutesResponse};
use sr_data::chart::ChartKind;

use crate::msg::{Effect, Msg, RequestId};
use crate::rows::{cluster_rows, route_rows, SummaryRow};

/// Candidate routes for the submitted form, plus their scores once known.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteView {
    pub start_coord: LatLng,
    pub dest_coord: LatLng,
    pub routes: Vec<CandidateRoute>,
    pub distances: Vec<f64>,
    pub durations: Vec<String>,
    pub buttons: Vec<String>,
    /// `None` until the backend answers
    pub safety_scores: Option<Vec<Option<f64>>>,
    /// `None` until the backend answers
    pub accidents: Option<Vec<Rc<[AccidentRecord]>>>,
    pub active_route: usize,
    pub rows: Vec<SummaryRow>,
    score_request: RequestId,
}

impl RouteView {
    fn new(start: LatLng, dest: LatLng, routes: Vec<CandidateRoute>, request: RequestId) -> Self {
        let mut view = Self {
            start_coord: start,
            dest_coord: dest,
            distances: routes.iter().map(CandidateRoute::distance_miles).collect(),
            durations: routes.iter().map(CandidateRoute::duration_label).collect(),
            buttons: routes
                .iter()
                .enumerate()
                .map(|(idx, r)| r.button_label(idx))
                .collect(),
            routes,
            safety_scores: None,
            accidents: None,
            active_route: 0,
            rows: Vec::new(),
            score_request: request,
        };
        view.refresh_rows();
        view
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// `None` while loading, `Some(None)` when the backend had no score.
    pub fn active_score(&self) -> Option<Option<f64>> {
        self.safety_scores
            .as_ref()
            .and_then(|scores| scores.get(self.active_route).copied())
    }

    pub fn active_accidents(&self) -> Option<Rc<[AccidentRecord]>> {
        self.accidents
            .as_ref()
            .and_then(|lists| lists.get(self.active_route).cloned())
    }

    /// Box around every candidate route.
    pub fn bounds(&self) -> Option<Bounds> {
        let corners: Vec<LatLng> = self
            .routes
            .iter()
            .flat_map(|r| [r.bounds.south_west, r.bounds.north_east])
            .collect();
        Bounds::enclosing(&corners)
    }

    pub fn paths(&self) -> Vec<Vec<LatLng>> {
        self.routes.iter().map(|r| r.path.clone()).collect()
    }

    fn refresh_rows(&mut self) {
        let summary = self.active_accidents().map(|a| compute_summary(&a));
        let idx = self.active_route;
        self.rows = route_rows(
            self.active_score(),
            &self.durations[idx],
            self.distances[idx],
            summary.as_ref(),
        );
    }

    /// Map and chart redraws for the cached results.
    fn redraw(&self, chart: ChartKind) -> Vec<Effect> {
        let mut effects = Vec::new();
        let Some(accidents) = self.active_accidents() else {
            return effects;
        };
        match self.bounds() {
            Some(bounds) => effects.push(Effect::ShowRoutes {
                bounds,
                paths: self.paths(),
                active: self.active_route,
            }),
            None => warn!("routes have no usable bounds, skipping map update"),
        }
        effects.push(Effect::RenderChart {
            kind: chart,
            accidents,
        });
        effects
    }
}

/// An expanded accident cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterView {
    pub cluster_id: ClusterId,
    pub location: LatLng,
    /// `"lat, lng"` to five decimals
    pub loc_str: String,
    pub avg_severity: f64,
    pub accidents: Option<Rc<[AccidentRecord]>>,
    pub rows: Vec<SummaryRow>,
    request: RequestId,
}

impl ClusterView {
    fn new(cluster_id: ClusterId, location: LatLng, avg_severity: f64, request: RequestId) -> Self {
        let loc_str = location.label();
        let rows = cluster_rows(&loc_str, avg_severity, None);
        Self {
            cluster_id,
            location,
            loc_str,
            avg_severity,
            accidents: None,
            rows,
            request,
        }
    }
}

/// What the detail panel describes.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DetailView {
    #[default]
    None,
    Route(RouteView),
    /// A cluster takes over the panel; the route on screen before it is kept
    /// so it can come back without a refetch.
    Cluster {
        cluster: ClusterView,
        prior_route: Option<RouteView>,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub form: RouteForm,
    pub detail: DetailView,
    pub chart: ChartKind,
    pub show_tutorial: bool,
    last_request: RequestId,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The route view on screen, if any.
    pub fn route(&self) -> Option<&RouteView> {
        match &self.detail {
            DetailView::Route(route) => Some(route),
            _ => None,
        }
    }

    /// The cluster view on screen, if any.
    pub fn cluster(&self) -> Option<&ClusterView> {
        match &self.detail {
            DetailView::Cluster { cluster, .. } => Some(cluster),
            _ => None,
        }
    }

    pub fn rows(&self) -> &[SummaryRow] {
        match &self.detail {
            DetailView::None => &[],
            DetailView::Route(route) => route.rows.as_slice(),
            DetailView::Cluster { cluster, .. } => cluster.rows.as_slice(),
        }
    }

    /// Accidents behind the table and charts currently shown.
    pub fn accidents(&self) -> Option<Rc<[AccidentRecord]>> {
        match &self.detail {
            DetailView::None => None,
            DetailView::Route(route) => route.active_accidents(),
            DetailView::Cluster { cluster, .. } => cluster.accidents.clone(),
        }
    }

    /// A score or cluster request for the displayed view is outstanding.
    pub fn is_loading(&self) -> bool {
        match &self.detail {
            DetailView::None => false,
            DetailView::Route(route) => route.accidents.is_none(),
            DetailView::Cluster { cluster, .. } => cluster.accidents.is_none(),
        }
    }

    /// Apply `msg` and return the effects to run, in order.
    pub fn update(&mut self, msg: Msg) -> Vec<Effect> {
        match msg {
            Msg::FormChanged { field, value } => {
                self.form.set(field, value);
                Vec::new()
            }
            Msg::Submit => self.submit(),
            Msg::RoutesLoaded {
                start,
                dest,
                routes,
            } => self.routes_loaded(start, dest, routes),
            Msg::DirectionsFailed(err) => {
                error!("Unable to get directions: {}", err);
                Vec::new()
            }
            Msg::ScoresLoaded { request, response } => self.scores_loaded(request, response),
            Msg::ScoresFailed { request, error } => {
                if self.awaiting_scores(request).is_some() {
                    error!("Unable to get safety scores for routes: {}", error);
                } else {
                    debug!("ignoring failure of stale score request {}: {}", request, error);
                }
                Vec::new()
            }
            Msg::SelectRoute(idx) => self.select_route(idx),
            Msg::ClusterClicked {
                cluster_id,
                location,
                avg_severity,
            } => self.expand_cluster(cluster_id, location, avg_severity),
            Msg::ClusterLoaded { request, accidents } => self.cluster_loaded(request, accidents),
            Msg::ClusterFailed { request, error } => {
                if self.awaiting_cluster(request).is_some() {
                    error!("Unable to get details for cluster: {}", error);
                } else {
                    debug!("ignoring failure of stale cluster request {}: {}", request, error);
                }
                Vec::new()
            }
            Msg::ReturnToRoute => self.return_to_route(),
            Msg::SelectChart(kind) => {
                self.chart = kind;
                self.accidents()
                    .map(|accidents| Effect::RenderChart { kind, accidents })
                    .into_iter()
                    .collect()
            }
            Msg::ToggleTutorial => {
                self.show_tutorial = !self.show_tutorial;
                Vec::new()
            }
        }
    }

    fn issue_request(&mut self) -> RequestId {
        self.last_request = self.last_request.next();
        self.last_request
    }

    fn submit(&mut self) -> Vec<Effect> {
        if !self.form.is_complete() {
            debug!("route form incomplete, not submitting");
            return Vec::new();
        }
        info!("Finding routes from {} to {}", self.form.start, self.form.dest);
        vec![Effect::FetchDirections(self.form.clone())]
    }

    fn routes_loaded(&mut self, start: LatLng, dest: LatLng, mut routes: Vec<CandidateRoute>) -> Vec<Effect> {
        if routes.is_empty() {
            warn!("No routes found between {} and {}", start.label(), dest.label());
            return Vec::new();
        }
        routes.truncate(MAX_ROUTES);

        let request = self.issue_request();
        let view = RouteView::new(start, dest, routes, request);
        let body = ScoreRoutesRequest::from_routes(&view.routes);
        self.detail = DetailView::Route(view);
        vec![Effect::FetchScores { request, body }]
    }

    /// The route view (shown, or parked behind a cluster) waiting on `request`.
    fn awaiting_scores(&mut self, request: RequestId) -> Option<&mut RouteView> {
        let route = match &mut self.detail {
            DetailView::Route(route) => route,
            DetailView::Cluster {
                prior_route: Some(route),
                ..
            } => route,
            _ => return None,
        };
        (route.score_request == request && route.accidents.is_none()).then_some(route)
    }

    fn awaiting_cluster(&mut self, request: RequestId) -> Option<&mut ClusterView> {
        match &mut self.detail {
            DetailView::Cluster { cluster, .. }
                if cluster.request == request && cluster.accidents.is_none() =>
            {
                Some(cluster)
            }
            _ => None,
        }
    }

    fn scores_loaded(&mut self, request: RequestId, response: ScoreRoutesResponse) -> Vec<Effect> {
        let chart = self.chart;
        let on_screen = matches!(self.detail, DetailView::Route(_));
        let Some(route) = self.awaiting_scores(request) else {
            debug!("discarding stale score response {}", request);
            return Vec::new();
        };

        let expected = route.route_count();
        if !response.matches(expected) {
            error!(
                "Unable to get safety scores for routes: got {} scores and {} accident lists for {} routes",
                response.scores.len(),
                response.accidents.len(),
                expected
            );
            return Vec::new();
        }

        route.safety_scores = Some(response.scores);
        route.accidents = Some(response.accidents.into_iter().map(Rc::from).collect());
        route.refresh_rows();

        if on_screen {
            route.redraw(chart)
        } else {
            Vec::new()
        }
    }

    fn select_route(&mut self, idx: usize) -> Vec<Effect> {
        let chart = self.chart;
        let DetailView::Route(route) = &mut self.detail else {
            warn!("No route on screen to select");
            return Vec::new();
        };
        if idx >= route.route_count() {
            warn!("Route {} is out of range ({} routes)", idx, route.route_count());
            return Vec::new();
        }
        if idx == route.active_route {
            return Vec::new();
        }

        route.active_route = idx;
        route.refresh_rows();
        match route.active_accidents() {
            Some(accidents) => vec![
                Effect::SelectMapRoute(idx),
                Effect::RenderChart {
                    kind: chart,
                    accidents,
                },
            ],
            None => Vec::new(),
        }
    }

    fn expand_cluster(&mut self, cluster_id: ClusterId, location: LatLng, avg_severity: f64) -> Vec<Effect> {
        let request = self.issue_request();
        let prior_route = match std::mem::take(&mut self.detail) {
            DetailView::None => None,
            DetailView::Route(route) => Some(route),
            DetailView::Cluster { prior_route, .. } => prior_route,
        };
        info!("Expanding cluster {}", cluster_id);
        self.detail = DetailView::Cluster {
            cluster: ClusterView::new(cluster_id.clone(), location, avg_severity, request),
            prior_route,
        };
        vec![Effect::FetchClusterAccidents {
            request,
            cluster_id,
        }]
    }

    fn cluster_loaded(&mut self, request: RequestId, accidents: Vec<AccidentRecord>) -> Vec<Effect> {
        let kind = self.chart;
        let Some(cluster) = self.awaiting_cluster(request) else {
            debug!("discarding stale cluster response {}", request);
            return Vec::new();
        };

        let summary = compute_summary(&accidents);
        let accidents: Rc<[AccidentRecord]> = Rc::from(accidents);
        cluster.rows = cluster_rows(&cluster.loc_str, cluster.avg_severity, Some(&summary));
        cluster.accidents = Some(accidents.clone());
        vec![Effect::RenderChart { kind, accidents }]
    }

    fn return_to_route(&mut self) -> Vec<Effect> {
        if !matches!(self.detail, DetailView::Cluster { .. }) {
            return Vec::new();
        }
        if let DetailView::Cluster { prior_route, .. } = std::mem::take(&mut self.detail) {
            self.detail = prior_route.map(DetailView::Route).unwrap_or_default();
        }

        let chart = self.chart;
        match &mut self.detail {
            DetailView::Route(route) => {
                route.refresh_rows();
                route.redraw(chart)
            }
            _ => Vec::new(),
        }
    }
}
