use crate::core::models::{
    CacheGroup, ChunkScope, DevServerSpec, OutputSpec, PathSet, ResolveSpec, SplitChunksSpec,
};
use crate::core::naming::NamingTemplate;
use crate::core::plugins::{CopyPattern, Minimizer, PluginSpec};
use crate::core::rules::{FilePattern, LoaderStep, TransformRule};
use crate::utils::Result;
use std::collections::BTreeMap;
use std::path::PathBuf;

pub const DEV_SERVER_PORT: u16 = 8081;

/// Minimum asset size in bytes before compression applies
const COMPRESSION_THRESHOLD: u64 = 10240;

const BABEL_PRESETS: [&str; 2] = ["@babel/preset-react", "@babel/preset-env"];
const BABEL_PLUGINS: [&str; 1] = ["@babel/plugin-transform-react-jsx"];

/// Sections shared by both modes
#[derive(Debug, Clone)]
pub struct BaseConfig {
    pub entry: BTreeMap<String, PathBuf>,
    pub output: OutputSpec,
    pub resolve: ResolveSpec,
    pub rules: Vec<TransformRule>,
    pub plugins: Vec<PluginSpec>,
    pub split_chunks: SplitChunksSpec,
}

/// Mode-specific sections merged onto the base
///
/// `rules` and `plugins` are appended after the base lists; the remaining
/// sections replace their base counterpart wholesale when present.
#[derive(Debug, Clone, Default)]
pub struct ModeOverrides {
    pub entry: Option<BTreeMap<String, PathBuf>>,
    pub output: Option<OutputSpec>,
    pub resolve: Option<ResolveSpec>,
    pub split_chunks: Option<SplitChunksSpec>,
    pub rules: Vec<TransformRule>,
    pub plugins: Vec<PluginSpec>,
    pub minimizers: Vec<Minimizer>,
    pub dev_server: Option<DevServerSpec>,
}

/// The shared base configuration: common entry point, hashed output naming
/// under the static subpath, asset rules, vendor chunk splitting, and the
/// plugin list both modes carry.
pub fn base(paths: &PathSet) -> Result<BaseConfig> {
    let mut entry = BTreeMap::new();
    entry.insert("app".to_string(), paths.src.clone());

    let output = OutputSpec {
        path: paths.dist.clone(),
        filename: NamingTemplate::new(format!("{}/js/[name].[hash].js", paths.static_prefix)),
    };

    let rules = vec![
        TransformRule::new(
            FilePattern::new(r"\.(png|jpg|gif|svg)$")?,
            vec![LoaderStep::File {
                name: "[name].[ext]".into(),
            }],
        ),
        TransformRule::new(
            FilePattern::new(r"\.(woff(2)?|ttf|eot)")?,
            vec![LoaderStep::File {
                name: "[name].[ext]".into(),
            }],
        ),
        TransformRule::new(
            FilePattern::new(r"(?i)\.scss$")?,
            vec![
                LoaderStep::CssExtract,
                LoaderStep::Css {
                    modules: true,
                    source_map: true,
                },
                LoaderStep::Sass { source_map: true },
            ],
        ),
    ];

    let plugins = vec![
        PluginSpec::FriendlyErrors,
        PluginSpec::Progress,
        PluginSpec::CssExtract {
            filename: NamingTemplate::new(format!(
                "{}/css/[name].[contenthash].css",
                paths.static_prefix
            )),
        },
        PluginSpec::Html {
            template: paths.public.join("index.html"),
            filename: "index.html".to_string(),
            hash: false,
        },
        PluginSpec::Copy {
            patterns: vec![
                CopyPattern {
                    from: paths.src.join("assets/images"),
                    to: format!("{}/media", paths.static_prefix),
                },
                CopyPattern {
                    from: paths.src.join("assets/fonts"),
                    to: format!("{}/fonts", paths.static_prefix),
                },
            ],
        },
    ];

    let mut cache_groups = BTreeMap::new();
    cache_groups.insert(
        "vendor".to_string(),
        CacheGroup {
            name: "vendors".to_string(),
            test: FilePattern::new("node_modules")?,
            chunks: ChunkScope::All,
            enforce: true,
        },
    );

    Ok(BaseConfig {
        entry,
        output,
        resolve: ResolveSpec {
            extensions: vec!["*".to_string(), ".js".to_string(), ".jsx".to_string()],
        },
        rules,
        plugins,
        split_chunks: SplitChunksSpec { cache_groups },
    })
}

/// Development overrides: script/style rules, a source-map emitting plugin,
/// dev-server settings, and no minification.
pub fn development(paths: &PathSet) -> Result<ModeOverrides> {
    let rules = vec![
        babel_rule()?,
        css_rule()?,
        TransformRule::new(
            FilePattern::new(r"\.(png|svg|jpg|gif)$")?,
            vec![LoaderStep::File {
                name: "[name].[ext]".into(),
            }],
        ),
    ];

    Ok(ModeOverrides {
        rules,
        plugins: vec![PluginSpec::SourceMap {
            filename: "[file].map".into(),
        }],
        dev_server: Some(DevServerSpec {
            content_base: paths.dist.clone(),
            compress: true,
            port: DEV_SERVER_PORT,
            watch_content_base: true,
            progress: true,
            hot: true,
        }),
        ..Default::default()
    })
}

/// Production overrides: script/style rules, bundle analysis and
/// compression plugins, CSS and script minimizers.
pub fn production() -> Result<ModeOverrides> {
    Ok(ModeOverrides {
        rules: vec![babel_rule()?, css_rule()?],
        plugins: vec![
            PluginSpec::BundleAnalyzer,
            PluginSpec::Compression {
                test: FilePattern::new(r"\.js$|\.html$")?,
                filename: "[path].gz[query]".into(),
                threshold: COMPRESSION_THRESHOLD,
            },
        ],
        minimizers: vec![Minimizer::CssOptimizer, Minimizer::Terser],
        ..Default::default()
    })
}

fn babel_rule() -> Result<TransformRule> {
    Ok(TransformRule::new(
        FilePattern::new(r"\.(js|jsx)$")?,
        vec![LoaderStep::Babel {
            presets: BABEL_PRESETS.iter().map(|s| s.to_string()).collect(),
            plugins: BABEL_PLUGINS.iter().map(|s| s.to_string()).collect(),
        }],
    )
    .with_exclude(FilePattern::new("node_modules")?))
}

fn css_rule() -> Result<TransformRule> {
    Ok(TransformRule::new(
        FilePattern::new(r"\.css$")?,
        vec![
            LoaderStep::Style,
            LoaderStep::Css {
                modules: true,
                source_map: false,
            },
            LoaderStep::PostCss,
        ],
    ))
}
