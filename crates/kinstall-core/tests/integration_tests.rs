//! Integration tests for kinstall-core services, run against the in-memory
//! filesystem adapter.

use std::path::{Path, PathBuf};

use kinstall_adapters::{MemoryFilesystem, StandardLayout};
use kinstall_core::{
    application::{ApplicationError, InstallerService},
    domain::{Application, GeneratorBehavior, Kustomization, Namespace, Phase},
    error::InstallerError,
};

const WORK: &str = "/work";
const INSTALLER: &str = "/installer";

fn service(fs: &MemoryFilesystem) -> InstallerService {
    InstallerService::new(
        Box::new(fs.clone()),
        Box::new(StandardLayout::new(WORK, INSTALLER)),
    )
}

fn app(names: &[&str]) -> Application {
    Application::from_names(names.iter().copied()).unwrap()
}

fn path(p: &str) -> PathBuf {
    PathBuf::from(p)
}

fn read_kustomization(fs: &MemoryFilesystem, p: &str) -> Kustomization {
    let text = fs
        .read_file(Path::new(p))
        .unwrap_or_else(|| panic!("missing {p}"));
    Kustomization::from_yaml(&text).unwrap()
}

/// A namespace with output and (possibly empty) staging folders.
fn seed_namespace(fs: MemoryFilesystem, ns: &str) -> MemoryFilesystem {
    fs.with_dir(format!("{WORK}/output/{ns}"))
        .with_dir(format!("{WORK}/staging/{ns}/params"))
        .with_dir(format!("{WORK}/staging/{ns}/secrets"))
}

fn shop_fixture() -> MemoryFilesystem {
    seed_namespace(MemoryFilesystem::new(), "shop")
        .with_file("/work/output/shop/deploy.yaml", "kind: Deployment")
        .with_file("/work/output/shop/svc.yaml", "kind: Service")
        .with_file("/work/staging/shop/params/app.env", "LOG_LEVEL=info")
        .with_file("/work/staging/shop/secrets/db.env", "PASSWORD=s3cret")
}

// ── End-to-end scenario ──────────────────────────────────────────────────────

#[test]
fn shop_scenario_builds_both_layers() {
    let fs = shop_fixture();

    let report = service(&fs).build(&app(&["shop"])).unwrap();

    // Base layer
    assert!(fs.exists_file("/installer/shop/base/deploy.yaml"));
    assert!(fs.exists_file("/installer/shop/base/svc.yaml"));
    assert!(!fs.exists_file("/work/output/shop/deploy.yaml"));
    assert!(!fs.exists_file("/work/output/shop/svc.yaml"));

    let base = read_kustomization(&fs, "/installer/shop/base/kustomization.yaml");
    assert_eq!(base.resources, ["deploy.yaml", "svc.yaml"]);
    assert!(base.config_map_generator.is_none());

    // Template layer
    assert_eq!(
        fs.read_file(Path::new("/installer/shop/template/params/app.env"))
            .as_deref(),
        Some("LOG_LEVEL=info")
    );
    assert!(fs.exists_file("/installer/shop/template/secrets/db.env"));

    let overlay = read_kustomization(&fs, "/installer/shop/template/kustomization.yaml");
    assert_eq!(overlay.resources, ["../base"]);
    assert!(overlay.generator_options.unwrap().disable_name_suffix_hash);

    let cm = overlay.config_maps();
    assert_eq!(cm.len(), 1);
    assert_eq!(cm[0].name, "app");
    assert_eq!(cm[0].behavior, GeneratorBehavior::Merge);
    assert_eq!(cm[0].envs, ["params/app.env"]);

    let secrets = overlay.secrets();
    assert_eq!(secrets.len(), 1);
    assert_eq!(secrets[0].name, "db");
    assert_eq!(secrets[0].behavior, GeneratorBehavior::Create);
    assert_eq!(secrets[0].envs, ["secrets/db.env"]);

    // Report mirrors the filesystem
    assert_eq!(report.resource_count(), 2);
    assert_eq!(report.generator_count(), 2);
    assert_eq!(report.template[0].base_reference, "../base");
}

// ── Base layer ───────────────────────────────────────────────────────────────

#[test]
fn nested_manifests_are_flattened_and_others_skipped() {
    let fs = seed_namespace(MemoryFilesystem::new(), "web")
        .with_file("/work/output/web/a/b/ingress.yml", "")
        .with_file("/work/output/web/cm.yaml", "")
        .with_file("/work/output/web/README.md", "")
        .with_file("/work/output/web/Dockerfile", "");

    service(&fs).build(&app(&["web"])).unwrap();

    let base = read_kustomization(&fs, "/installer/web/base/kustomization.yaml");
    let mut resources = base.resources.clone();
    resources.sort();
    assert_eq!(resources, ["cm.yaml", "ingress.yml"]);

    assert!(fs.exists_file("/installer/web/base/ingress.yml"));
    assert!(fs.exists_file("/work/output/web/README.md"));
    assert!(fs.exists_file("/work/output/web/Dockerfile"));
}

#[test]
fn every_manifest_is_referenced_exactly_once() {
    let mut fs = seed_namespace(MemoryFilesystem::new(), "big");
    let mut expected = Vec::new();
    for i in 0..25 {
        let name = format!("res-{i:02}.yaml");
        fs = fs.with_file(format!("/work/output/big/dir{}/{name}", i % 4), "");
        expected.push(name);
    }

    service(&fs).build(&app(&["big"])).unwrap();

    let base = read_kustomization(&fs, "/installer/big/base/kustomization.yaml");
    let mut resources = base.resources.clone();
    resources.sort();
    assert_eq!(resources, expected);

    let leftovers: Vec<_> = fs
        .list_files()
        .into_iter()
        .filter(|p| p.starts_with("/work/output/big"))
        .collect();
    assert!(leftovers.is_empty(), "{leftovers:?}");
}

#[test]
fn rerun_on_empty_output_writes_header_only_base() {
    let fs = seed_namespace(MemoryFilesystem::new(), "shop");
    let svc = service(&fs);

    svc.base_builder()
        .build_namespace(&Namespace::new("shop").unwrap())
        .unwrap();
    let report = svc
        .base_builder()
        .build_namespace(&Namespace::new("shop").unwrap())
        .unwrap();

    assert!(report.resources.is_empty());
    let text = fs
        .read_file(Path::new("/installer/shop/base/kustomization.yaml"))
        .unwrap();
    assert_eq!(text.trim(), "resources: []");
}

#[test]
fn colliding_manifest_names_abort_before_moving() {
    let fs = seed_namespace(MemoryFilesystem::new(), "shop")
        .with_file("/work/output/shop/a/svc.yaml", "")
        .with_file("/work/output/shop/b/svc.yaml", "");

    let err = service(&fs).build(&app(&["shop"])).unwrap_err();

    assert!(matches!(
        err.root_cause(),
        InstallerError::Application(ApplicationError::DestinationExists { .. })
    ));
    assert!(fs.exists_file("/work/output/shop/a/svc.yaml"));
    assert!(fs.exists_file("/work/output/shop/b/svc.yaml"));
}

#[test]
fn generated_kustomization_manifest_is_not_overwritten() {
    let fs = seed_namespace(MemoryFilesystem::new(), "shop")
        .with_file("/work/output/shop/deploy.yaml", "kind: Deployment")
        .with_file("/work/output/shop/kustomization.yaml", "kind: Kustomization");

    let err = service(&fs).build(&app(&["shop"])).unwrap_err();

    match err.root_cause() {
        InstallerError::Application(ApplicationError::DestinationExists { path: dest }) => {
            assert_eq!(dest, &path("/installer/shop/base/kustomization.yaml"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        fs.read_file(Path::new("/work/output/shop/kustomization.yaml"))
            .as_deref(),
        Some("kind: Kustomization")
    );
    assert!(fs.exists_file("/work/output/shop/deploy.yaml"));
    assert!(!fs.exists_file("/installer/shop/base/kustomization.yaml"));
}

#[test]
fn base_walk_failure_is_fatal_with_context() {
    let fs = seed_namespace(MemoryFilesystem::new(), "shop");
    fs.fail_walk("/work/output/shop");

    let err = service(&fs).build(&app(&["shop"])).unwrap_err();

    match &err {
        InstallerError::Phase {
            namespace, phase, ..
        } => {
            assert_eq!(namespace.as_str(), "shop");
            assert_eq!(*phase, Phase::Base);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(matches!(
        err.root_cause(),
        InstallerError::Application(ApplicationError::Walk { .. })
    ));
    // Nothing of the template phase ran.
    assert!(!fs.exists_file("/installer/shop/template/kustomization.yaml"));
}

#[test]
fn missing_output_folder_is_reported() {
    let fs = MemoryFilesystem::new()
        .with_dir("/work/staging/shop/params")
        .with_dir("/work/staging/shop/secrets");

    let err = service(&fs).build(&app(&["shop"])).unwrap_err();

    assert!(matches!(
        err.root_cause(),
        InstallerError::Application(ApplicationError::MissingFolder { .. })
    ));
}

// ── Template layer ───────────────────────────────────────────────────────────

#[test]
fn empty_namespace_yields_header_only_manifests() {
    let fs = seed_namespace(MemoryFilesystem::new(), "empty");

    let report = service(&fs).build(&app(&["empty"])).unwrap();

    let base = read_kustomization(&fs, "/installer/empty/base/kustomization.yaml");
    assert!(base.resources.is_empty());

    let overlay = read_kustomization(&fs, "/installer/empty/template/kustomization.yaml");
    assert_eq!(overlay.resources, ["../base"]);
    assert_eq!(overlay.config_map_generator, Some(Vec::new()));
    assert_eq!(overlay.secret_generator, Some(Vec::new()));
    assert!(fs.is_dir_path("/installer/empty/template/params"));
    assert!(fs.is_dir_path("/installer/empty/template/secrets"));

    assert_eq!(report.generator_count(), 0);
}

#[test]
fn env_files_keep_names_and_nested_folders_are_not_generators() {
    let fs = seed_namespace(MemoryFilesystem::new(), "shop")
        .with_file("/work/staging/shop/params/app.env", "")
        .with_file("/work/staging/shop/params/cache.properties", "")
        .with_file("/work/staging/shop/params/nested/ignored.env", "")
        .with_file("/work/staging/shop/secrets/db.env", "")
        .with_file("/work/staging/shop/secrets/tls.env", "");

    service(&fs).build(&app(&["shop"])).unwrap();

    let overlay = read_kustomization(&fs, "/installer/shop/template/kustomization.yaml");
    let cm: Vec<_> = overlay.config_maps().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(cm, ["app", "cache"]);
    let secrets: Vec<_> = overlay.secrets().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(secrets, ["db", "tls"]);

    // The folder moved as a unit, nested content included.
    assert!(fs.exists_file("/installer/shop/template/params/nested/ignored.env"));
    assert!(!fs.is_dir_path("/work/staging/shop/params"));
}

#[test]
fn overlay_always_has_exactly_one_base_reference() {
    let fs = shop_fixture();
    service(&fs).build(&app(&["shop"])).unwrap();

    let overlay = read_kustomization(&fs, "/installer/shop/template/kustomization.yaml");
    assert_eq!(overlay.resources.len(), 1);
}

#[test]
fn failed_params_walk_is_fatal_and_never_half_writes() {
    let fs = shop_fixture();
    fs.fail_walk("/installer/shop/template/params");

    let err = service(&fs).build(&app(&["shop"])).unwrap_err();

    assert!(matches!(
        err,
        InstallerError::Phase {
            phase: Phase::Template,
            ..
        }
    ));
    assert!(!fs.exists_file("/installer/shop/template/kustomization.yaml"));
}

#[test]
fn failed_secrets_walk_is_fatal() {
    let fs = shop_fixture();
    fs.fail_walk("/installer/shop/template/secrets");

    let err = service(&fs).build(&app(&["shop"])).unwrap_err();

    assert!(matches!(
        err.root_cause(),
        InstallerError::Application(ApplicationError::Walk { .. })
    ));
    assert!(!fs.exists_file("/installer/shop/template/kustomization.yaml"));
}

#[test]
fn missing_staging_folder_leaves_other_staging_untouched() {
    let fs = MemoryFilesystem::new()
        .with_dir("/work/output/shop")
        .with_file("/work/staging/shop/params/app.env", "");

    let err = service(&fs).build(&app(&["shop"])).unwrap_err();

    assert!(matches!(
        err.root_cause(),
        InstallerError::Application(ApplicationError::MissingFolder { .. })
    ));
    assert!(fs.exists_file("/work/staging/shop/params/app.env"));
}

// ── Orchestration ────────────────────────────────────────────────────────────

#[test]
fn namespaces_are_processed_in_declared_order() {
    let fs = seed_namespace(seed_namespace(MemoryFilesystem::new(), "zeta"), "alpha")
        .with_file("/work/output/zeta/z.yaml", "")
        .with_file("/work/output/alpha/a.yaml", "");

    let report = service(&fs).build(&app(&["zeta", "alpha"])).unwrap();

    let order: Vec<_> = report.base.iter().map(|b| b.namespace.as_str()).collect();
    assert_eq!(order, ["zeta", "alpha"]);
    let order: Vec<_> = report
        .template
        .iter()
        .map(|t| t.namespace.as_str())
        .collect();
    assert_eq!(order, ["zeta", "alpha"]);
}

#[test]
fn failure_in_one_namespace_aborts_the_run() {
    // "second" has no staging folders, so its template phase fails; the base
    // phase of both namespaces has already completed by then.
    let fs = seed_namespace(MemoryFilesystem::new(), "first")
        .with_dir("/work/output/second");

    let err = service(&fs)
        .build(&app(&["first", "second"]))
        .unwrap_err();

    match err {
        InstallerError::Phase {
            namespace, phase, ..
        } => {
            assert_eq!(namespace.as_str(), "second");
            assert_eq!(phase, Phase::Template);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(fs.exists_file("/installer/first/template/kustomization.yaml"));
    assert!(fs.exists_file("/installer/second/base/kustomization.yaml"));
}

#[test]
fn empty_application_is_a_no_op() {
    let fs = MemoryFilesystem::new();

    let report = service(&fs).build(&Application::default()).unwrap();

    assert!(report.base.is_empty());
    assert!(report.template.is_empty());
    assert!(fs.list_files().is_empty());
}

#[test]
fn plan_does_not_touch_the_filesystem() {
    let fs = shop_fixture();
    let before = fs.list_files();

    let plan = service(&fs).plan(&app(&["shop"])).unwrap();

    assert_eq!(fs.list_files(), before);
    let ns = &plan.namespaces[0];
    assert_eq!(
        ns.manifests,
        [
            path("/work/output/shop/deploy.yaml"),
            path("/work/output/shop/svc.yaml")
        ]
    );
    assert_eq!(ns.params, [path("/work/staging/shop/params/app.env")]);
    assert_eq!(ns.secrets, [path("/work/staging/shop/secrets/db.env")]);
}

// ── helpers on the memory adapter ────────────────────────────────────────────

trait MemoryFsExt {
    fn exists_file(&self, p: &str) -> bool;
    fn is_dir_path(&self, p: &str) -> bool;
}

impl MemoryFsExt for MemoryFilesystem {
    fn exists_file(&self, p: &str) -> bool {
        self.read_file(Path::new(p)).is_some()
    }

    fn is_dir_path(&self, p: &str) -> bool {
        use kinstall_core::application::ports::Filesystem;
        self.is_dir(Path::new(p))
    }
}
