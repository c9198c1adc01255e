use crate::core::models::{BuildPlan, Mode, OptimizationSpec, PathSet};
use crate::core::presets::{self, BaseConfig, ModeOverrides};
use crate::utils::Result;

/// Resolve the build plan for a mode
///
/// Pure and idempotent: validates the paths, builds the shared base, selects
/// exactly one override set, merges. No I/O and no existence checks.
pub fn resolve(mode: Mode, paths: &PathSet) -> Result<BuildPlan> {
    paths.validate()?;

    let base = presets::base(paths)?;
    let overrides = match mode {
        Mode::Development => presets::development(paths)?,
        Mode::Production => presets::production()?,
    };

    Ok(merge(mode, base, overrides))
}

/// Merge one override set onto the shared base
///
/// Section-level policy:
/// - `entry`, `output`, `resolve`, `split_chunks`: from the base; an
///   override section, when present, replaces it wholesale
/// - `rules`, `plugins`: base list followed by the mode list; for a path
///   matched by several rules the last one wins (`BuildPlan::rule_for`)
/// - `minimizers`: the mode list, wholesale
/// - `dev_server`: mode-only
pub fn merge(mode: Mode, base: BaseConfig, overrides: ModeOverrides) -> BuildPlan {
    let mut rules = base.rules;
    rules.extend(overrides.rules);

    let mut plugins = base.plugins;
    plugins.extend(overrides.plugins);

    BuildPlan {
        mode,
        entry: overrides.entry.unwrap_or(base.entry),
        output: overrides.output.unwrap_or(base.output),
        resolve: overrides.resolve.unwrap_or(base.resolve),
        rules,
        plugins,
        optimization: OptimizationSpec {
            split_chunks: overrides.split_chunks.unwrap_or(base.split_chunks),
            minimizers: overrides.minimizers,
        },
        dev_server: overrides.dev_server,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::OutputSpec;
    use crate::core::naming::NamingTemplate;
    use crate::core::plugins::{Minimizer, PluginSpec};
    use std::path::{Path, PathBuf};

    fn paths() -> PathSet {
        PathSet::from_root(Path::new("/proj"))
    }

    #[test]
    fn test_modes_agree_on_shared_sections() {
        let dev = resolve(Mode::Development, &paths()).unwrap();
        let prod = resolve(Mode::Production, &paths()).unwrap();

        assert_eq!(dev.entry, prod.entry);
        assert_eq!(dev.output, prod.output);
        assert_eq!(dev.resolve, prod.resolve);
        assert_eq!(
            dev.optimization.split_chunks,
            prod.optimization.split_chunks
        );
        // shared asset rules and plugins lead both lists
        assert_eq!(dev.rules[..3], prod.rules[..3]);
        assert_eq!(dev.plugins[..5], prod.plugins[..5]);
    }

    #[test]
    fn test_modes_differ_only_in_overridden_sections() {
        let dev = resolve(Mode::Development, &paths()).unwrap();
        let prod = resolve(Mode::Production, &paths()).unwrap();

        assert_ne!(dev.rules[3..], prod.rules[3..]);
        assert_ne!(dev.plugins[5..], prod.plugins[5..]);
        assert_ne!(dev.optimization.minimizers, prod.optimization.minimizers);
        assert!(dev.dev_server.is_some());
        assert!(prod.dev_server.is_none());
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let first = resolve(Mode::Production, &paths()).unwrap();
        let second = resolve(Mode::Production, &paths()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_mode_falls_back_to_development() {
        let staging = resolve(Mode::from_arg("staging"), &paths()).unwrap();
        let dev = resolve(Mode::Development, &paths()).unwrap();
        assert_eq!(staging, dev);
    }

    #[test]
    fn test_production_output_template() {
        let prod = resolve(Mode::Production, &paths()).unwrap();
        assert!(prod.output.filename.as_str().contains("static/js/"));
        assert!(prod.output.filename.has_hash_token());
    }

    #[test]
    fn test_production_optimization_and_dev_plugins() {
        let prod = resolve(Mode::Production, &paths()).unwrap();
        assert!(prod
            .optimization
            .minimizers
            .contains(&Minimizer::CssOptimizer));
        assert!(prod.optimization.minimizers.contains(&Minimizer::Terser));

        let dev = resolve(Mode::Development, &paths()).unwrap();
        assert!(dev
            .plugins
            .iter()
            .any(|p| matches!(p, PluginSpec::SourceMap { .. })));
        assert!(!dev
            .plugins
            .iter()
            .any(|p| matches!(p, PluginSpec::Compression { .. })));
        assert!(!dev
            .plugins
            .iter()
            .any(|p| matches!(p, PluginSpec::BundleAnalyzer)));
        assert!(dev.optimization.minimizers.is_empty());
    }

    #[test]
    fn test_overlapping_image_rules_last_wins() {
        let dev = resolve(Mode::Development, &paths()).unwrap();
        let image = Path::new("src/assets/logo.png");

        let winner = dev.rule_for(image).unwrap();
        assert_eq!(winner, dev.rules.last().unwrap());
        assert_eq!(winner.test.source(), r"\.(png|svg|jpg|gif)$");

        // production keeps only the shared asset rule for images
        let prod = resolve(Mode::Production, &paths()).unwrap();
        let winner = prod.rule_for(image).unwrap();
        assert_eq!(winner.test.source(), r"\.(png|jpg|gif|svg)$");
    }

    #[test]
    fn test_override_sections_replace_wholesale() {
        let base = presets::base(&paths()).unwrap();
        let custom_output = OutputSpec {
            path: PathBuf::from("/proj/out"),
            filename: NamingTemplate::new("bundles/[name].js"),
        };
        let overrides = ModeOverrides {
            output: Some(custom_output.clone()),
            ..Default::default()
        };

        let plan = merge(Mode::Production, base, overrides);
        assert_eq!(plan.output, custom_output);
        assert!(plan.optimization.minimizers.is_empty());
    }

    #[test]
    fn test_invalid_paths_surface_configuration_error() {
        let mut bad = paths();
        bad.static_prefix = String::new();
        assert!(resolve(Mode::Development, &bad).is_err());
    }

    #[test]
    fn test_plan_json_round_trip() {
        let prod = resolve(Mode::Production, &paths()).unwrap();
        let json = prod.to_json_pretty().unwrap();
        let back: BuildPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(back, prod);
    }
}
