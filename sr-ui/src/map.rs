//! The Leaflet map: accident cluster markers and candidate route overlays.
//!
//! [`MapRenderer`] decides what is drawn and in which order; a [`MapSurface`]
//! carries out the individual [`MapCommand`]s. In the browser that surface is
//! [`LeafletSurface`]; tests record the commands instead.

use log::{error, warn};
use serde::{Deserialize, Serialize};
use sr_core::cluster::{severity_extent, AccidentCluster, ClusterId};
use sr_core::color::severity_color;
use sr_core::geo::{Bounds, LatLng};
use sr_view::Msg;
use thiserror::Error;

use crate::js_bridge;

pub const ACTIVE_ROUTE_COLOR: &str = "#669df6";
pub const INACTIVE_ROUTE_COLOR: &str = "#bbbbbb";
pub const ROUTE_WEIGHT: u32 = 5;
pub const CLUSTER_RADIUS: u32 = 7;

/// Roughly the geographic center of the contiguous US.
pub const INITIAL_CENTER: LatLng = LatLng {
    lat: 37.0902,
    lng: -95.7129,
};
pub const INITIAL_ZOOM: u8 = 5;

#[derive(Error, Debug, PartialEq)]
pub enum MapError {
    #[error("no routes to draw")]
    NoRoutes,

    #[error("route {0} has no geometry")]
    EmptyPath(usize),

    #[error("route bounds are not a valid box")]
    InvalidBounds,

    #[error("route {index} is out of range ({count} routes drawn)")]
    RouteOutOfRange { index: usize, count: usize },

    #[error("map has not been created")]
    NotCreated,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: &'static str,
    pub weight: u32,
}

impl LineStyle {
    pub fn for_route(active: bool) -> Self {
        Self {
            color: if active {
                ACTIVE_ROUTE_COLOR
            } else {
                INACTIVE_ROUTE_COLOR
            },
            weight: ROUTE_WEIGHT,
        }
    }
}

/// One drawing instruction for a map surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum MapCommand {
    #[serde(rename_all = "camelCase")]
    Init {
        container_id: String,
        center: LatLng,
        zoom: u8,
        mapbox_token: Option<String>,
        /// Try to recenter on the browser's position
        locate: bool,
    },
    #[serde(rename_all = "camelCase")]
    AddCluster {
        cluster_id: ClusterId,
        at: LatLng,
        avg_severity: f64,
        color: String,
        radius: u32,
        popup: String,
    },
    ClearRoutes,
    AddRoute {
        index: usize,
        path: Vec<LatLng>,
        style: LineStyle,
    },
    AddEndpoint {
        at: LatLng,
    },
    StyleRoute {
        index: usize,
        style: LineStyle,
    },
    RaiseRoute {
        index: usize,
    },
    RaiseEndpoints,
    FitBounds {
        bounds: Bounds,
    },
    Destroy,
}

/// Something that can carry out map commands.
pub trait MapSurface {
    fn apply(&mut self, command: MapCommand);
}

/// A click on the map, as reported by the surface.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MapEvent {
    #[serde(rename_all = "camelCase")]
    ClusterClicked {
        cluster_id: ClusterId,
        location: LatLng,
        avg_severity: f64,
    },
    RouteClicked {
        index: usize,
    },
}

impl MapEvent {
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl From<MapEvent> for Msg {
    fn from(event: MapEvent) -> Self {
        match event {
            MapEvent::ClusterClicked {
                cluster_id,
                location,
                avg_severity,
            } => Msg::ClusterClicked {
                cluster_id,
                location,
                avg_severity,
            },
            MapEvent::RouteClicked { index } => Msg::SelectRoute(index),
        }
    }
}

/// Settings for [`MapRenderer::create`].
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    pub container_id: String,
    pub mapbox_token: Option<String>,
    pub locate: bool,
}

/// Owns one map surface for its whole life.
pub struct MapRenderer<S: MapSurface> {
    surface: S,
    created: bool,
    clusters_drawn: bool,
    route_count: usize,
    active: Option<usize>,
}

impl<S: MapSurface> MapRenderer<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            created: false,
            clusters_drawn: false,
            route_count: 0,
            active: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn route_count(&self) -> usize {
        self.route_count
    }

    pub fn active_route(&self) -> Option<usize> {
        self.active
    }

    /// Set up tiles and controls. Later calls do nothing.
    pub fn create(&mut self, options: &MapOptions) {
        if self.created {
            return;
        }
        self.surface.apply(MapCommand::Init {
            container_id: options.container_id.clone(),
            center: INITIAL_CENTER,
            zoom: INITIAL_ZOOM,
            mapbox_token: options.mapbox_token.clone(),
            locate: options.locate,
        });
        self.created = true;
    }

    /// Draw the static cluster layer. Only the first call draws.
    pub fn draw_clusters(&mut self, clusters: &[AccidentCluster]) -> Result<(), MapError> {
        if !self.created {
            return Err(MapError::NotCreated);
        }
        if self.clusters_drawn {
            warn!("cluster layer already drawn");
            return Ok(());
        }
        let extent = severity_extent(clusters).unwrap_or((0.0, 0.0));
        for cluster in clusters {
            self.surface.apply(MapCommand::AddCluster {
                cluster_id: cluster.id(),
                at: cluster.centroid(),
                avg_severity: cluster.avg_severity,
                color: severity_color(cluster.avg_severity, extent),
                radius: CLUSTER_RADIUS,
                popup: format!("Average accident severity: {:.2}", cluster.avg_severity),
            });
        }
        self.clusters_drawn = true;
        Ok(())
    }

    /// Replace the route layer with `paths` and fit the view to `bounds`.
    ///
    /// Nothing is drawn unless every input is usable.
    pub fn show_routes(&mut self, bounds: Bounds, paths: &[Vec<LatLng>], active: usize) -> Result<(), MapError> {
        if !self.created {
            return Err(MapError::NotCreated);
        }
        if paths.is_empty() {
            return Err(MapError::NoRoutes);
        }
        if let Some(idx) = paths.iter().position(|p| p.is_empty()) {
            return Err(MapError::EmptyPath(idx));
        }
        if !bounds.is_valid() {
            return Err(MapError::InvalidBounds);
        }
        if active >= paths.len() {
            return Err(MapError::RouteOutOfRange {
                index: active,
                count: paths.len(),
            });
        }

        self.surface.apply(MapCommand::ClearRoutes);
        self.surface.apply(MapCommand::FitBounds { bounds });

        let first = &paths[0];
        for at in [first[0], first[first.len() - 1]] {
            self.surface.apply(MapCommand::AddEndpoint { at });
        }
        for (index, path) in paths.iter().enumerate() {
            self.surface.apply(MapCommand::AddRoute {
                index,
                path: path.clone(),
                style: LineStyle::for_route(index == active),
            });
        }
        self.surface.apply(MapCommand::RaiseRoute { index: active });
        self.surface.apply(MapCommand::RaiseEndpoints);

        self.route_count = paths.len();
        self.active = Some(active);
        Ok(())
    }

    /// Emphasize route `index` without redrawing any geometry.
    pub fn select_active_route(&mut self, index: usize) -> Result<(), MapError> {
        if index >= self.route_count {
            return Err(MapError::RouteOutOfRange {
                index,
                count: self.route_count,
            });
        }
        for i in 0..self.route_count {
            self.surface.apply(MapCommand::StyleRoute {
                index: i,
                style: LineStyle::for_route(i == index),
            });
        }
        self.surface.apply(MapCommand::RaiseRoute { index });
        self.surface.apply(MapCommand::RaiseEndpoints);
        self.active = Some(index);
        Ok(())
    }

    /// Tear the map down. The renderer can be created again afterwards.
    pub fn destroy(&mut self) {
        if !self.created {
            return;
        }
        self.surface.apply(MapCommand::Destroy);
        self.created = false;
        self.clusters_drawn = false;
        self.route_count = 0;
        self.active = None;
    }
}

impl<S: MapSurface> Drop for MapRenderer<S> {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Map surface backed by Leaflet in the page.
pub struct LeafletSurface {
    container_id: String,
}

impl LeafletSurface {
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
        }
    }
}

impl MapSurface for LeafletSurface {
    fn apply(&mut self, command: MapCommand) {
        match serde_json::to_string(&command) {
            Ok(json) => js_bridge::apply_map_command(&self.container_id, &json),
            Err(err) => error!("could not encode map command: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        commands: Vec<MapCommand>,
    }

    impl MapSurface for Recorder {
        fn apply(&mut self, command: MapCommand) {
            self.commands.push(command);
        }
    }

    fn created() -> MapRenderer<Recorder> {
        let mut map = MapRenderer::new(Recorder::default());
        map.create(&MapOptions {
            container_id: "leaflet-map-element".into(),
            mapbox_token: Some("pk.test".into()),
            locate: true,
        });
        map
    }

    fn bounds() -> Bounds {
        Bounds::new(LatLng::new(32.0, -84.4), LatLng::new(33.8, -81.0))
    }

    fn paths(n: usize) -> Vec<Vec<LatLng>> {
        (0..n)
            .map(|i| {
                vec![
                    LatLng::new(33.749, -84.388),
                    LatLng::new(32.8 + i as f64 * 0.1, -83.6),
                    LatLng::new(32.0809, -81.0912),
                ]
            })
            .collect()
    }

    fn drawn_after_last_clear(commands: &[MapCommand]) -> &[MapCommand] {
        let start = commands
            .iter()
            .rposition(|c| *c == MapCommand::ClearRoutes)
            .unwrap();
        &commands[start..]
    }

    fn emphasized(commands: &[MapCommand], route_count: usize) -> Vec<usize> {
        // Latest style per route, whether from AddRoute or StyleRoute
        let mut styles = vec![None; route_count];
        for c in commands {
            match c {
                MapCommand::AddRoute { index, style, .. } | MapCommand::StyleRoute { index, style } => {
                    styles[*index] = Some(*style)
                }
                _ => {}
            }
        }
        styles
            .iter()
            .enumerate()
            .filter(|(_, s)| s.map(|s| s.color) == Some(ACTIVE_ROUTE_COLOR))
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn create_is_idempotent() {
        let mut map = created();
        map.create(&MapOptions {
            container_id: "other".into(),
            mapbox_token: None,
            locate: false,
        });
        assert_eq!(map.surface().commands.len(), 1);
        assert!(matches!(map.surface().commands[0], MapCommand::Init { zoom: INITIAL_ZOOM, .. }));
    }

    #[test]
    fn clusters_are_drawn_once_with_severity_colors() {
        let clusters = vec![
            AccidentCluster {
                cluster_id: 1,
                avg_severity: 2.0,
                centroid_latitude: 33.7,
                centroid_longitude: -84.4,
            },
            AccidentCluster {
                cluster_id: 2,
                avg_severity: 3.5,
                centroid_latitude: 32.1,
                centroid_longitude: -81.1,
            },
        ];
        let mut map = created();
        map.draw_clusters(&clusters).unwrap();
        map.draw_clusters(&clusters).unwrap();

        let added: Vec<_> = map
            .surface()
            .commands
            .iter()
            .filter_map(|c| match c {
                MapCommand::AddCluster { color, popup, radius, .. } => Some((color.clone(), popup.clone(), *radius)),
                _ => None,
            })
            .collect();
        assert_eq!(added.len(), 2);
        assert_ne!(added[0].0, added[1].0);
        assert_eq!(added[1].1, "Average accident severity: 3.50");
        assert_eq!(added[0].2, CLUSTER_RADIUS);
    }

    #[test]
    fn drawing_requires_create() {
        let mut map = MapRenderer::new(Recorder::default());
        assert_eq!(map.draw_clusters(&[]), Err(MapError::NotCreated));
        assert_eq!(map.show_routes(bounds(), &paths(1), 0), Err(MapError::NotCreated));
        assert!(map.surface().commands.is_empty());
    }

    #[test]
    fn route_layer_is_replaced_wholesale() {
        let mut map = created();
        map.show_routes(bounds(), &paths(3), 0).unwrap();
        map.show_routes(bounds(), &paths(2), 1).unwrap();

        let commands = &map.surface().commands;
        let latest = drawn_after_last_clear(commands);
        let routes = latest
            .iter()
            .filter(|c| matches!(c, MapCommand::AddRoute { .. }))
            .count();
        let endpoints = latest
            .iter()
            .filter(|c| matches!(c, MapCommand::AddEndpoint { .. }))
            .count();
        assert_eq!(routes, 2);
        assert_eq!(endpoints, 2);
        assert_eq!(commands.iter().filter(|c| **c == MapCommand::ClearRoutes).count(), 2);
        assert_eq!(latest.last(), Some(&MapCommand::RaiseEndpoints));
        assert_eq!(emphasized(latest, 2), vec![1]);
        assert_eq!(map.route_count(), 2);
    }

    #[test]
    fn endpoints_come_from_first_route() {
        let mut map = created();
        map.show_routes(bounds(), &paths(2), 0).unwrap();
        let ends: Vec<_> = map
            .surface()
            .commands
            .iter()
            .filter_map(|c| match c {
                MapCommand::AddEndpoint { at } => Some(*at),
                _ => None,
            })
            .collect();
        assert_eq!(ends, vec![LatLng::new(33.749, -84.388), LatLng::new(32.0809, -81.0912)]);
    }

    #[test]
    fn selection_emphasizes_exactly_one_line() {
        let mut map = created();
        map.show_routes(bounds(), &paths(3), 0).unwrap();
        let drawn = map.surface().commands.len();

        map.select_active_route(2).unwrap();
        let commands = &map.surface().commands;
        assert!(commands[drawn..]
            .iter()
            .all(|c| !matches!(c, MapCommand::AddRoute { .. } | MapCommand::ClearRoutes)));
        assert_eq!(emphasized(commands, 3), vec![2]);
        assert_eq!(commands.last(), Some(&MapCommand::RaiseEndpoints));
        assert_eq!(map.active_route(), Some(2));
    }

    #[test]
    fn bad_input_draws_nothing() {
        let mut map = created();
        let before = map.surface().commands.len();

        assert_eq!(map.show_routes(bounds(), &[], 0), Err(MapError::NoRoutes));
        assert_eq!(
            map.show_routes(bounds(), &[paths(1)[0].clone(), Vec::new()], 0),
            Err(MapError::EmptyPath(1))
        );
        let inverted = Bounds::new(LatLng::new(34.0, -84.4), LatLng::new(32.0, -81.0));
        assert_eq!(map.show_routes(inverted, &paths(1), 0), Err(MapError::InvalidBounds));
        assert_eq!(
            map.show_routes(bounds(), &paths(2), 2),
            Err(MapError::RouteOutOfRange { index: 2, count: 2 })
        );
        assert_eq!(
            map.select_active_route(0),
            Err(MapError::RouteOutOfRange { index: 0, count: 0 })
        );
        assert_eq!(map.surface().commands.len(), before);
    }

    #[test]
    fn destroy_tears_down_once() {
        let mut map = created();
        map.destroy();
        map.destroy();
        let destroys = map
            .surface()
            .commands
            .iter()
            .filter(|c| **c == MapCommand::Destroy)
            .count();
        assert_eq!(destroys, 1);
    }

    #[test]
    fn events_become_messages() {
        let event = MapEvent::parse(
            r#"{"type":"clusterClicked","clusterId":17,"location":{"lat":33.75,"lng":-84.39},"avgSeverity":2.31}"#,
        )
        .unwrap();
        assert_eq!(
            Msg::from(event),
            Msg::ClusterClicked {
                cluster_id: ClusterId::from(17),
                location: LatLng::new(33.75, -84.39),
                avg_severity: 2.31,
            }
        );

        let event = MapEvent::parse(r#"{"type":"routeClicked","index":2}"#).unwrap();
        assert_eq!(Msg::from(event), Msg::SelectRoute(2));
    }

    #[test]
    fn commands_serialize_for_leaflet() {
        let json = serde_json::to_value(MapCommand::StyleRoute {
            index: 1,
            style: LineStyle::for_route(true),
        })
        .unwrap();
        assert_eq!(json["op"], "styleRoute");
        assert_eq!(json["style"]["color"], ACTIVE_ROUTE_COLOR);

        let json = serde_json::to_value(MapCommand::FitBounds { bounds: bounds() }).unwrap();
        assert_eq!(json["bounds"]["southWest"]["lat"], 32.0);
    }
}
