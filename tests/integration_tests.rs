//! Integration tests for sdnroute
//!
//! These tests drive the network map and the controller end to end.

mod common;

use common::{
    grid_link_states, init_tracing, lsi, random_link_states, random_map, route_costs,
    three_device_map, RecordingInterface,
};
use sdnroute::config::{load_config, save_config};
use sdnroute::{
    DynamicRouting, NetworkMap, RouteError, RoutingConfig, RoutingError, SdnRouting,
    ShortestPathAlgorithm,
};
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_three_device_scenario() {
    init_tracing();
    for algorithm in ShortestPathAlgorithm::ALL {
        let map = three_device_map(algorithm);

        let d1 = map.get_routes("D1");
        assert_eq!(d1.len(), 2, "{algorithm}");
        assert_eq!(d1[0].to_string(), "dest=P1;via=null;if=if-a;cost=1");
        assert_eq!(d1[1].to_string(), "dest=P2;via=if-b;if=if-a;cost=2");

        let d2 = map.get_routes("D2");
        assert_eq!(d2.len(), 2, "{algorithm}");
        assert!(d2.iter().all(|r| r.is_direct()));
        assert_eq!(d2[0].interface, "if-b");
        assert_eq!(d2[1].interface, "if-c");

        let d3 = map.get_routes("D3");
        assert_eq!(d3[0].to_string(), "dest=P1;via=if-c;if=if-d;cost=2");
        assert_eq!(d3[1].to_string(), "dest=P2;via=null;if=if-d;cost=1");
    }
}

#[test]
fn test_direct_routes_have_no_next_hop() {
    for algorithm in ShortestPathAlgorithm::ALL {
        let map = random_map(algorithm, 11, 30, 12);
        for device in map.devices() {
            for route in map.get_routes(&device) {
                assert_eq!(route.is_direct(), route.cost == 1, "{algorithm}: {route}");
            }
        }
    }
}

#[test]
fn test_routes_only_target_prefixes() {
    for algorithm in ShortestPathAlgorithm::ALL {
        let map = random_map(algorithm, 3, 25, 10);
        let devices = map.devices();
        for device in &devices {
            for route in map.get_routes(device) {
                assert!(!devices.contains(&route.destination), "{algorithm}: {route}");
            }
        }
    }
}

#[test]
fn test_algorithms_agree_on_costs() {
    init_tracing();
    for seed in 0..8 {
        let maps: Vec<NetworkMap> = ShortestPathAlgorithm::ALL
            .iter()
            .map(|&algorithm| random_map(algorithm, seed, 20, 8))
            .collect();

        for device in maps[0].devices() {
            let expected = route_costs(&maps[0].get_routes(&device));
            for map in &maps[1..] {
                assert_eq!(
                    route_costs(&map.get_routes(&device)),
                    expected,
                    "seed {seed}, device {device}, {}",
                    map.algorithm()
                );
            }
        }
    }
}

#[test]
fn test_routes_are_deterministic() {
    for algorithm in ShortestPathAlgorithm::ALL {
        let first = random_map(algorithm, 42, 20, 8);
        let second = random_map(algorithm, 42, 20, 8);
        for device in first.devices() {
            assert_eq!(first.get_routes(&device), second.get_routes(&device));
        }
    }
}

#[test]
fn test_insertion_order_does_not_change_routes() {
    let link_states = random_link_states(5, 15, 6);
    let forward = NetworkMap::new(ShortestPathAlgorithm::Dijkstra);
    let backward = NetworkMap::new(ShortestPathAlgorithm::Dijkstra);
    for (device, link_state) in &link_states {
        forward.add_link_state(device, link_state).unwrap();
    }
    for (device, link_state) in link_states.iter().rev() {
        backward.add_link_state(device, link_state).unwrap();
    }

    assert_eq!(forward.network_graph(), backward.network_graph());
    for device in forward.devices() {
        assert_eq!(forward.get_routes(&device), backward.get_routes(&device));
    }
}

#[test]
fn test_shared_prefix_is_one_node() {
    let map = NetworkMap::new(ShortestPathAlgorithm::Dijkstra);
    map.add_link_state("a", &[lsi("a1", "lan")]).unwrap();
    map.add_link_state("b", &[lsi("b1", "lan")]).unwrap();
    map.add_link_state("c", &[lsi("c1", "lan")]).unwrap();

    let graph = map.network_graph();
    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 6);
}

#[test]
fn test_routes_follow_topology_changes() {
    init_tracing();
    for algorithm in ShortestPathAlgorithm::ALL {
        let map = three_device_map(algorithm);
        assert_eq!(map.get_routes("D1").len(), 2);

        map.add_link_state("D4", &[lsi("if-e", "P2"), lsi("if-f", "P3")])
            .unwrap();
        let routes = map.get_routes("D1");
        assert_eq!(routes.len(), 3, "{algorithm}");
        assert_eq!(routes[2].destination, "P3");
        assert_eq!(routes[2].cost, 3);

        map.remove_link_state("D4").unwrap();
        assert_eq!(map.get_routes("D1").len(), 2, "{algorithm}");
        assert!(map.network_graph().node("P3").is_none());
    }
}

#[test]
fn test_unknown_device_gets_no_routes() {
    let map = three_device_map(ShortestPathAlgorithm::FloydWarshall);
    assert!(map.get_routes("D9").is_empty());
}

#[test]
fn test_grid_routes() {
    let map = NetworkMap::new(ShortestPathAlgorithm::Dijkstra);
    for (device, link_state) in grid_link_states(3, 3) {
        map.add_link_state(&device, &link_state).unwrap();
    }

    let routes = map.get_routes("router-0-0");
    // 9 LANs, 6 horizontal and 6 vertical links
    assert_eq!(routes.len(), 21);
    let far_lan = routes
        .iter()
        .find(|r| r.destination == "lan-2-2")
        .unwrap();
    assert_eq!(far_lan.cost, 5);
}

#[test]
fn test_controller_end_to_end() {
    init_tracing();
    let sdn = SdnRouting::new(ShortestPathAlgorithm::DijkstraSimple);
    let recorders: Vec<Arc<RecordingInterface>> =
        (0..3).map(|_| Arc::new(RecordingInterface::new())).collect();

    for ((device, link_state), recorder) in common::three_device_link_states()
        .into_iter()
        .zip(&recorders)
    {
        sdn.connect(device, link_state, recorder.clone()).unwrap();
    }
    sdn.update_all_nodes().unwrap();

    for recorder in &recorders {
        assert_eq!(recorder.update_count(), 1);
        assert_eq!(recorder.last_routes().unwrap().len(), 2);
    }

    sdn.disconnect("D3").unwrap();
    sdn.update("D1").unwrap();
    let routes = recorders[0].last_routes().unwrap();
    assert_eq!(routes.len(), 2);

    let err = sdn.update("D3").unwrap_err();
    assert!(matches!(
        err,
        RouteError::Routing(RoutingError::NotConnected { .. })
    ));
}

#[test]
fn test_controller_from_saved_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("routing.json");
    let config = RoutingConfig::new(ShortestPathAlgorithm::BellmanFord).with_auto_update(true);
    save_config(&path, &config).unwrap();

    let sdn = SdnRouting::from_config(&load_config(&path).unwrap());
    assert_eq!(sdn.network_map().algorithm(), ShortestPathAlgorithm::BellmanFord);

    let recorder = Arc::new(RecordingInterface::new());
    sdn.connect("D1", vec![lsi("if-a", "P1")], recorder.clone())
        .unwrap();
    assert_eq!(recorder.update_count(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_connect() {
    init_tracing();
    let sdn = Arc::new(SdnRouting::new(ShortestPathAlgorithm::Dijkstra));
    let link_states = grid_link_states(4, 4);

    let mut handles = Vec::new();
    for (device, link_state) in link_states.clone() {
        let sdn = Arc::clone(&sdn);
        handles.push(tokio::task::spawn_blocking(move || {
            let recorder = Arc::new(RecordingInterface::new());
            sdn.connect(&device, link_state, recorder.clone()).unwrap();
            sdn.update(&device).unwrap();
            recorder
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(sdn.connected_devices().len(), 16);

    // Same topology built sequentially
    let reference = NetworkMap::new(ShortestPathAlgorithm::Dijkstra);
    for (device, link_state) in &link_states {
        reference.add_link_state(device, link_state).unwrap();
    }
    assert_eq!(sdn.network_graph(), reference.network_graph());
    for (device, _) in &link_states {
        assert_eq!(
            sdn.network_map().get_routes(device),
            reference.get_routes(device)
        );
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_dense_dijkstra_concurrent_with_topology_changes() {
    init_tracing();
    let map = Arc::new(NetworkMap::new(ShortestPathAlgorithm::DijkstraSimple));
    let link_states = grid_link_states(4, 4);
    let (first, rest) = link_states.split_at(1);
    map.add_link_state(&first[0].0, &first[0].1).unwrap();

    let mut handles = Vec::new();
    for (device, link_state) in rest.iter().cloned() {
        let map = Arc::clone(&map);
        handles.push(tokio::task::spawn_blocking(move || {
            map.add_link_state(&device, &link_state).unwrap();
        }));
    }
    for i in 0..8 {
        let map = Arc::clone(&map);
        handles.push(tokio::task::spawn_blocking(move || {
            let device = format!("transient-{i}");
            let link_state = [
                lsi(&format!("t{i}.1"), "lan-0-0"),
                lsi(&format!("t{i}.2"), &format!("t-net-{i}")),
            ];
            map.add_link_state(&device, &link_state).unwrap();
            map.get_routes(&device);
            map.remove_link_state(&device).unwrap();
        }));
    }
    for _ in 0..4 {
        let map = Arc::clone(&map);
        handles.push(tokio::task::spawn_blocking(move || {
            for _ in 0..20 {
                map.get_routes("router-0-0");
                map.get_routes("router-3-3");
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let reference = NetworkMap::new(ShortestPathAlgorithm::DijkstraSimple);
    for (device, link_state) in &link_states {
        reference.add_link_state(device, link_state).unwrap();
    }
    assert_eq!(map.network_graph(), reference.network_graph());
    for (device, _) in &link_states {
        assert_eq!(map.get_routes(device), reference.get_routes(device));
    }
}
