//! Integration test: base acceleration of the linear inverted pendulum.
//!
//! Drives the model through parameter-backed providers and checks the
//! analytic Jacobians against central finite differences of
//! `base_acceleration`, rebuilding the providers from the perturbed unknowns.

use approx::assert_relative_eq;
use nalgebra::{DVector, Vector2, Vector3};
use rand::Rng;
use stride_core::config::GRAVITY;
use stride_core::{
    Coords3D, DynamicsConfig, DynamicsError, OptimizationVariables, ParameterSet, StrideConfig,
};
use stride_dynamics::{
    ContactTimings, DynamicModel, Dynamics, DynamicsInputs, LinearInvertedPendulum, ProblemVariables,
};
use stride_test_utils::{
    ConstantFootholds, ConstantLoads, FD_STEP, QuadraticBaseMotion, central_difference, seeded_rng,
};

const HEIGHT: f64 = 0.58;

fn footholds_from(x: &DVector<f64>) -> ConstantFootholds {
    let points: Vec<Vector2<f64>> = x
        .as_slice()
        .chunks(2)
        .map(|p| Vector2::new(p[0], p[1]))
        .collect();
    ConstantFootholds::new(&points)
}

fn base_from(x: &DVector<f64>) -> QuadraticBaseMotion {
    let mut base = QuadraticBaseMotion::at_rest(Vector3::zeros());
    base.set_values(x);
    base
}

/// Random base, loads and footholds for `feet` end-effectors.
fn random_scene(feet: usize, seed: u64) -> (QuadraticBaseMotion, ConstantLoads, ConstantFootholds) {
    let mut rng = seeded_rng(seed);
    let base = QuadraticBaseMotion::new(
        Vector3::new(rng.gen_range(-0.2..0.2), rng.gen_range(-0.2..0.2), HEIGHT),
        Vector3::new(rng.gen_range(-0.5..0.5), rng.gen_range(-0.5..0.5), 0.0),
        Vector3::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)),
    );
    let loads: Vec<f64> = (0..feet).map(|_| rng.gen_range(10.0..60.0)).collect();
    let points: Vec<Vector2<f64>> = (0..feet)
        .map(|_| Vector2::new(rng.gen_range(-0.3..0.3), rng.gen_range(-0.3..0.3)))
        .collect();
    (base, ConstantLoads::new(&loads), ConstantFootholds::new(&points))
}

#[test]
fn single_foot_scenario() {
    let lip = LinearInvertedPendulum::new(HEIGHT, 80.0);
    let base = QuadraticBaseMotion::at_rest(Vector3::new(0.0, 0.05, HEIGHT));
    let loads = ConstantLoads::new(&[80.0]);
    let feet = ConstantFootholds::new(&[Vector2::new(0.1, 0.0)]);
    let inputs = DynamicsInputs::new(&base, &loads, &feet);

    let acc = lip.base_acceleration(&inputs, 0.2).unwrap();
    assert_relative_eq!(acc.x, GRAVITY / HEIGHT * (0.0 - 0.1), epsilon = 1e-12);
    assert_relative_eq!(acc.y, GRAVITY / HEIGHT * 0.05, epsilon = 1e-12);
    assert_relative_eq!(acc.z, 0.0);
}

#[test]
fn two_feet_scenario() {
    let lip = LinearInvertedPendulum::new(HEIGHT, 80.0);
    let base = QuadraticBaseMotion::at_rest(Vector3::new(0.1, 0.0, HEIGHT));
    let loads = ConstantLoads::new(&[40.0, 40.0]);
    let feet = ConstantFootholds::new(&[Vector2::new(0.0, 0.0), Vector2::new(0.2, 0.0)]);
    let inputs = DynamicsInputs::new(&base, &loads, &feet);

    let cop = lip.center_of_pressure(&inputs, 0.0).unwrap();
    assert_relative_eq!(cop, Vector2::new(0.1, 0.0), epsilon = 1e-12);

    // CoM above the CoP: balanced
    let acc = lip.base_acceleration(&inputs, 0.0).unwrap();
    assert_relative_eq!(acc, Vector3::zeros(), epsilon = 1e-12);

    for ee in 0..2 {
        let jac = lip
            .jacobian_of_acc_wrt_ee_pos(&inputs, 0.0, ee, Coords3D::X)
            .unwrap();
        // moving a foot forward moves the CoP forward, decelerating the CoM
        assert_relative_eq!(jac.get(2 * ee), -0.5 * GRAVITY / HEIGHT, epsilon = 1e-12);
    }
}

#[test]
fn load_jacobian_matches_finite_differences() {
    let lip = LinearInvertedPendulum::default();
    for seed in 0..10 {
        let (base, loads, feet) = random_scene(4, seed);
        let inputs = DynamicsInputs::new(&base, &loads, &feet);
        let x = loads.values();

        for dim in Coords3D::ALL {
            let acc_dim = |x: &DVector<f64>| {
                let loads = ConstantLoads::new(x.as_slice());
                let inputs = DynamicsInputs::new(&base, &loads, &feet);
                lip.base_acceleration(&inputs, 0.0).unwrap()[dim.index()]
            };

            for ee in 0..4 {
                let jac = lip.jacobian_of_acc_wrt_load(&inputs, 0.0, ee, dim).unwrap();
                assert_eq!(jac.cols(), 4);
                let fd = central_difference(&acc_dim, &x, ee, FD_STEP);
                assert_relative_eq!(jac.get(ee), fd, epsilon = 1e-6);
                assert!(jac.iter().all(|(col, _)| col == ee));
            }
        }
    }
}

#[test]
fn foothold_jacobian_matches_finite_differences() {
    let lip = LinearInvertedPendulum::default();
    for seed in 0..10 {
        let (base, loads, feet) = random_scene(3, 100 + seed);
        let inputs = DynamicsInputs::new(&base, &loads, &feet);
        let x = feet.values();

        for dim in Coords3D::ALL {
            let acc_dim = |x: &DVector<f64>| {
                let feet = footholds_from(x);
                let inputs = DynamicsInputs::new(&base, &loads, &feet);
                lip.base_acceleration(&inputs, 0.0).unwrap()[dim.index()]
            };

            for ee in 0..3 {
                let jac = lip.jacobian_of_acc_wrt_ee_pos(&inputs, 0.0, ee, dim).unwrap();
                for axis in 0..2 {
                    let col = 2 * ee + axis;
                    // a foot only moves the CoP along its own axis
                    let expected = if dim.is_horizontal() && axis == dim.index() {
                        central_difference(&acc_dim, &x, col, FD_STEP)
                    } else {
                        0.0
                    };
                    assert_relative_eq!(jac.get(col), expected, epsilon = 1e-6);
                }
            }
        }
    }
}

#[test]
fn vertical_base_jacobian_matches_finite_differences() {
    let lip = LinearInvertedPendulum::default();
    let (base, loads, feet) = random_scene(2, 7);
    let x = base.values();
    let t = 0.3;

    let acc_z = |x: &DVector<f64>| {
        let base = base_from(x);
        let inputs = DynamicsInputs::new(&base, &loads, &feet);
        lip.base_acceleration(&inputs, t).unwrap().z
    };

    let jac = lip.jacobian_of_acc_wrt_base(&base, t, Coords3D::Z);
    assert_eq!(jac.cols(), 9);
    for i in 0..9 {
        let fd = central_difference(&acc_z, &x, i, FD_STEP);
        assert_relative_eq!(jac.get(i), fd, epsilon = 1e-6);
    }
    assert_relative_eq!(jac.get(8), 1.0);

    for dim in Coords3D::HORIZONTAL {
        assert!(lip.jacobian_of_acc_wrt_base(&base, t, dim).is_zero());
    }
}

#[test]
fn no_ground_contact_is_an_error() {
    let dynamics = Dynamics::default();
    let base = QuadraticBaseMotion::at_rest(Vector3::new(0.0, 0.0, HEIGHT));
    let loads = ConstantLoads::new(&[0.0, 0.0]);
    let feet = ConstantFootholds::new(&[Vector2::new(0.1, 0.1), Vector2::new(-0.1, -0.1)]);
    let inputs = DynamicsInputs::new(&base, &loads, &feet);

    assert!(matches!(
        dynamics.base_acceleration(&inputs, 0.4),
        Err(DynamicsError::NoGroundContact { total_load, .. }) if total_load == 0.0
    ));
}

#[test]
fn dynamics_from_toml() {
    let config = StrideConfig::from_toml_str(
        r#"
        [dynamics]
        model = "linear_inverted_pendulum"
        pendulum_height = 0.4
        mass = 30.0
        "#,
    )
    .unwrap();
    let dynamics = Dynamics::from_config(&config.dynamics).unwrap();

    let base = QuadraticBaseMotion::at_rest(Vector3::new(0.2, 0.0, 0.4));
    let loads = ConstantLoads::new(&[30.0]);
    let feet = ConstantFootholds::new(&[Vector2::new(0.0, 0.0)]);
    let inputs = DynamicsInputs::new(&base, &loads, &feet);

    let acc = dynamics.base_acceleration(&inputs, 0.0).unwrap();
    assert_relative_eq!(acc.x, GRAVITY / 0.4 * 0.2, epsilon = 1e-12);
    assert_eq!(
        dynamics,
        Dynamics::from(LinearInvertedPendulum::from_config(&DynamicsConfig {
            pendulum_height: 0.4,
            mass: 30.0,
            ..DynamicsConfig::default()
        }))
    );
}

#[test]
fn problem_arena_round_trip() {
    let mut vars = ProblemVariables::new();
    let loads = vars.insert(ParameterSet::with_values("ee_load", DVector::from_vec(vec![40.0, 40.0])).into());
    let lf = vars.insert(ContactTimings::with_defaults(0, vec![0.3, 0.3, 0.3, 0.3]).into());
    let rf = vars.insert(ContactTimings::with_defaults(1, vec![0.2, 0.4, 0.6]).into());
    assert_eq!(vars.count(), 2 + 3 + 2);

    let mut x = vars.values();
    x[vars.offset(lf)] = 0.35;
    x[vars.offset(rf) + 1] = 0.5;
    vars.set_values(&x);

    let lf = vars.get(lf).as_contact_timings().unwrap();
    assert_relative_eq!(lf.durations()[3], 0.25, epsilon = 1e-12);
    let rf = vars.get(rf).as_contact_timings().unwrap();
    assert_relative_eq!(rf.durations()[2], 0.5, epsilon = 1e-12);
    assert_relative_eq!(rf.total_duration(), 1.2, epsilon = 1e-12);

    let load_values = vars.get(loads).as_parameters().unwrap().as_vector();
    let loads = ConstantLoads::new(load_values.as_slice());
    let feet = ConstantFootholds::new(&[Vector2::new(0.0, 0.0), Vector2::new(0.2, 0.0)]);
    let base = QuadraticBaseMotion::at_rest(Vector3::new(0.1, 0.0, HEIGHT));
    let inputs = DynamicsInputs::new(&base, &loads, &feet);
    assert_relative_eq!(
        Dynamics::default().base_acceleration(&inputs, 0.0).unwrap(),
        Vector3::zeros(),
        epsilon = 1e-12
    );
}

#[test]
fn parallel_evaluation_matches_serial() {
    let lip = LinearInvertedPendulum::default();
    let (base, loads, feet) = random_scene(4, 21);
    let inputs = DynamicsInputs::new(&base, &loads, &feet);
    let grid: Vec<f64> = (0..200).map(|k| f64::from(k) * 0.005).collect();

    let serial: Vec<Vector3<f64>> = grid
        .iter()
        .map(|&t| lip.base_acceleration(&inputs, t).unwrap())
        .collect();

    // providers are plain data, so each thread builds its own inputs
    let parallel: Vec<Vector3<f64>> = std::thread::scope(|s| {
        let handles: Vec<_> = grid
            .chunks(50)
            .map(|chunk| {
                let (lip, base, loads, feet) = (&lip, &base, &loads, &feet);
                s.spawn(move || {
                    let inputs = DynamicsInputs::new(base, loads, feet);
                    chunk
                        .iter()
                        .map(|&t| lip.base_acceleration(&inputs, t).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });

    assert_eq!(serial, parallel);
}
