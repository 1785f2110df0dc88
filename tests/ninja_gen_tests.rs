//! Tests for the complete Ninja file produced from a manifest.

use anyhow::{Context, Result, ensure};
use insta::assert_snapshot;
use ninjacc::ast::{BuildEnv, LibEntry, Manifest, TargetKind, TargetSpec};
use ninjacc::runner::render;
use rstest::{fixture, rstest};

#[fixture]
fn core_manifest() -> Manifest {
    Manifest {
        env: BuildEnv {
            cc: "gcc".into(),
            cxx: "g++".into(),
            cppflags: vec!["-DUNIX_ENABLED".into()],
            ccflags: vec!["-O2".into()],
            cpppath: vec!["#platform/wayland".into()],
            libs: vec![
                LibEntry::Name("z".into()),
                LibEntry::Resolved(vec!["libfoo.a_resolved_path".into()]),
            ],
            ..BuildEnv::default()
        },
        targets: vec![
            TargetSpec {
                kind: TargetKind::StaticLibrary,
                output: "libcore.a".into(),
                sources: vec!["foo.cpp".into(), "bar.c".into(), "baz.o".into()],
            },
            TargetSpec {
                kind: TargetKind::Program,
                output: "app".into(),
                sources: vec!["main.cpp".into(), "libcore.a".into()],
            },
        ],
        defaults: vec!["app".into()],
        ..Manifest::default()
    }
}

#[rstest]
fn renders_complete_file(core_manifest: Manifest) -> Result<()> {
    let ninja = render(&core_manifest)?;
    let expected = concat!(
        "# This file is generated by ninjacc. Do not edit.\n",
        "#\n",
        "# Regenerate it from the ninjacc manifest instead.\n",
        "\n",
        "CPPFLAGS = -DUNIX_ENABLED\n\n",
        "CFLAGS =\n\n",
        "CCFLAGS = -O2\n\n",
        "CXXFLAGS =\n\n",
        "CPPPATH = -I./platform/wayland\n\n",
        "LIBS = -lz libfoo.a_resolved_path\n\n",
        "rule compile_c\n",
        "  command = gcc $CFLAGS $CCFLAGS $CXXFLAGS $CPPFLAGS $CPPPATH -o $out -c $in\n",
        "  description = Building C object $out\n",
        "  depfile = $out.d\n",
        "  deps = gcc\n\n",
        "rule compile_cxx\n",
        "  command = g++ $CCFLAGS $CXXFLAGS $CPPFLAGS $CPPPATH -o $out -c $in\n",
        "  description = Building C++ object $out\n",
        "  depfile = $out.d\n",
        "  deps = gcc\n\n",
        "rule archive_static_library\n",
        "  command = ar qc $out $in && ranlib $out\n",
        "  description = Linking static library $out\n\n",
        "rule link_program\n",
        "  command = g++ -o $out $LIBS $in\n",
        "  description = Linking program $out\n\n",
        "rule clean\n",
        "  command = ninja -t clean\n",
        "  description = Cleaning all built files...\n\n",
        "build foo.o : compile_cxx foo.cpp\n",
        "  depfile = foo.o.d\n\n",
        "build bar.o : compile_c bar.c\n",
        "  depfile = bar.o.d\n\n",
        "build libcore.a : archive_static_library foo.o bar.o baz.o\n\n",
        "build main.o : compile_cxx main.cpp\n",
        "  depfile = main.o.d\n\n",
        "build app : link_program main.o libcore.a\n\n",
        "default app\n",
    );
    ensure!(ninja == expected, "unexpected Ninja output:\n{ninja}");
    Ok(())
}

#[rstest]
fn edges_snapshot(core_manifest: Manifest) -> Result<()> {
    let ninja = render(&core_manifest)?;
    let start = ninja.find("build ").context("edges should be written")?;
    let edges = ninja.get(start..).context("slice edges")?.trim_end();
    assert_snapshot!(edges, @r"
build foo.o : compile_cxx foo.cpp
  depfile = foo.o.d

build bar.o : compile_c bar.c
  depfile = bar.o.d

build libcore.a : archive_static_library foo.o bar.o baz.o

build main.o : compile_cxx main.cpp
  depfile = main.o.d

build app : link_program main.o libcore.a

default app
");
    Ok(())
}

#[rstest]
fn preamble_is_written_once_before_edges(core_manifest: Manifest) -> Result<()> {
    let ninja = render(&core_manifest)?;
    for marker in ["# This file is generated", "LIBS = ", "rule compile_c\n", "rule clean\n"] {
        ensure!(
            ninja.matches(marker).count() == 1,
            "{marker:?} should appear exactly once"
        );
    }
    let preamble_end = ninja
        .rfind("rule ")
        .context("rules should be written")?;
    let first_edge = ninja.find("build ").context("edges should be written")?;
    ensure!(preamble_end < first_edge, "rules must precede every edge");
    Ok(())
}

#[rstest]
fn rendering_is_deterministic(core_manifest: Manifest) -> Result<()> {
    let first = render(&core_manifest)?;
    let second = render(&core_manifest)?;
    ensure!(first == second, "repeated renders should be identical");
    Ok(())
}

#[rstest]
fn link_edges_never_bind_libraries(core_manifest: Manifest) -> Result<()> {
    let ninja = render(&core_manifest)?;
    let link = ninja
        .split("\n\n")
        .find(|block| block.starts_with("build app "))
        .context("link edge should be written")?;
    ensure!(
        link == "build app : link_program main.o libcore.a",
        "link edge should carry no bindings, got {link:?}"
    );
    ensure!(
        !link.contains("libfoo.a_resolved_path") && !link.contains("-lz"),
        "libraries belong in the global LIBS variable"
    );
    Ok(())
}

#[rstest]
fn targets_are_emitted_in_manifest_order(mut core_manifest: Manifest) -> Result<()> {
    core_manifest.targets.reverse();
    let ninja = render(&core_manifest)?;
    let app = ninja.find("build app ").context("link edge")?;
    let lib = ninja.find("build libcore.a ").context("archive edge")?;
    ensure!(app < lib, "reversed manifest should emit the program first");
    Ok(())
}

#[rstest]
fn object_targets_use_declared_output() -> Result<()> {
    let manifest = Manifest {
        targets: vec![TargetSpec {
            kind: TargetKind::Object,
            output: "build/os.o".into(),
            sources: vec!["platform/os.cpp".into()],
        }],
        ..Manifest::default()
    };
    let ninja = render(&manifest)?;
    ensure!(
        ninja.ends_with("build build/os.o : compile_cxx platform/os.cpp\n  depfile = build/os.o.d\n\n"),
        "unexpected object edge:\n{ninja}"
    );
    Ok(())
}

#[rstest]
fn invalid_object_target_fails() {
    let manifest = Manifest {
        targets: vec![TargetSpec {
            kind: TargetKind::Object,
            output: "x.o".into(),
            sources: Vec::new(),
        }],
        ..Manifest::default()
    };
    assert!(render(&manifest).is_err());
}
