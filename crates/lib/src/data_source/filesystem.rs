use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::attributes::AttributeStore;
use crate::consts::{DEFAULT_CONTENT_DIR, DEFAULT_LAYOUTS_DIR};
use crate::entity::{Document, Item, Layout};
use crate::project::config::DataSourceConfig;
use crate::vcs::{NoopVcs, Vcs, VcsAware};

use super::{DataSource, DataSourceError, EntityWriter, front_matter};

const CREATED_EXTENSION: &str = "html";

/// Items and layouts stored as files, one entity per file.
///
/// The identifier of a file is its path relative to the content (or layouts)
/// directory without the extension, prefixed by the configured root. Files
/// created through [`EntityWriter`] are registered with the installed VCS
/// backend, which defaults to [`NoopVcs`].
#[derive(Debug)]
pub struct FilesystemDataSource {
  content_dir: PathBuf,
  layouts_dir: PathBuf,
  items_root: String,
  layouts_root: String,
  vcs: Box<dyn Vcs>,
  item_paths: BTreeMap<String, PathBuf>,
  layout_paths: BTreeMap<String, PathBuf>,
}

struct LoadedFile {
  identifier: String,
  content: String,
  attributes: AttributeStore,
}

impl FilesystemDataSource {
  pub fn new(content_dir: impl Into<PathBuf>, layouts_dir: impl Into<PathBuf>) -> Self {
    Self {
      content_dir: content_dir.into(),
      layouts_dir: layouts_dir.into(),
      items_root: "/".to_string(),
      layouts_root: "/".to_string(),
      vcs: Box::new(NoopVcs),
      item_paths: BTreeMap::new(),
      layout_paths: BTreeMap::new(),
    }
  }

  pub fn from_config(project_root: &Path, config: &DataSourceConfig) -> Self {
    let content_dir = config
      .content_dir
      .clone()
      .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTENT_DIR));
    let layouts_dir = config
      .layouts_dir
      .clone()
      .unwrap_or_else(|| PathBuf::from(DEFAULT_LAYOUTS_DIR));

    let mut source = Self::new(project_root.join(content_dir), project_root.join(layouts_dir));
    source.items_root = config.items_root.clone();
    source.layouts_root = config.layouts_root.clone();
    source
  }

  pub fn content_dir(&self) -> &Path {
    &self.content_dir
  }

  pub fn layouts_dir(&self) -> &Path {
    &self.layouts_dir
  }

  fn write_new<D: Document>(dir: &Path, root: &str, document: &D, vcs: &dyn Vcs) -> Result<PathBuf, DataSourceError> {
    let path = path_for(dir, root, document.identifier())?;
    if path.exists() {
      return Err(DataSourceError::AlreadyExists {
        identifier: document.identifier().to_string(),
      });
    }

    let text =
      front_matter::render(document.attributes(), document.content()).map_err(|source| DataSourceError::Serialize {
        identifier: document.identifier().to_string(),
        source,
      })?;

    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).map_err(|source| DataSourceError::Write {
        path: parent.to_path_buf(),
        source,
      })?;
    }
    fs::write(&path, text).map_err(|source| DataSourceError::Write {
      path: path.clone(),
      source,
    })?;

    vcs.add(&path)?;
    info!(identifier = %document.identifier(), path = %path.display(), vcs = %vcs.name(), "created entity");

    Ok(path)
  }
}

impl DataSource for FilesystemDataSource {
  fn kind(&self) -> &str {
    "filesystem"
  }

  fn load_items(&mut self) -> Result<Vec<Item>, DataSourceError> {
    let files = load_dir(&self.content_dir, &self.items_root)?;
    self.item_paths = files.iter().map(|(path, file)| (file.identifier.clone(), path.clone())).collect();

    Ok(
      files
        .into_values()
        .map(|file| Item::new(file.identifier, file.content).with_attributes(file.attributes))
        .collect(),
    )
  }

  fn load_layouts(&mut self) -> Result<Vec<Layout>, DataSourceError> {
    let files = load_dir(&self.layouts_dir, &self.layouts_root)?;
    self.layout_paths = files.iter().map(|(path, file)| (file.identifier.clone(), path.clone())).collect();

    Ok(
      files
        .into_values()
        .map(|file| Layout::new(file.identifier, file.content).with_attributes(file.attributes))
        .collect(),
    )
  }

  fn vcs_aware(&self) -> Option<&dyn VcsAware> {
    Some(self)
  }

  fn vcs_aware_mut(&mut self) -> Option<&mut dyn VcsAware> {
    Some(self)
  }

  fn writer(&mut self) -> Option<&mut dyn EntityWriter> {
    Some(self)
  }
}

impl VcsAware for FilesystemDataSource {
  fn vcs(&self) -> &dyn Vcs {
    self.vcs.as_ref()
  }

  fn set_vcs(&mut self, vcs: Box<dyn Vcs>) {
    self.vcs = vcs;
  }
}

impl EntityWriter for FilesystemDataSource {
  fn create_item(&mut self, item: &Item) -> Result<PathBuf, DataSourceError> {
    if self.item_paths.contains_key(item.identifier()) {
      return Err(DataSourceError::AlreadyExists {
        identifier: item.identifier().to_string(),
      });
    }
    let path = Self::write_new(&self.content_dir, &self.items_root, item, self.vcs.as_ref())?;
    self.item_paths.insert(item.identifier().to_string(), path.clone());
    Ok(path)
  }

  fn create_layout(&mut self, layout: &Layout) -> Result<PathBuf, DataSourceError> {
    if self.layout_paths.contains_key(layout.identifier()) {
      return Err(DataSourceError::AlreadyExists {
        identifier: layout.identifier().to_string(),
      });
    }
    let path = Self::write_new(&self.layouts_dir, &self.layouts_root, layout, self.vcs.as_ref())?;
    self.layout_paths.insert(layout.identifier().to_string(), path.clone());
    Ok(path)
  }

  fn delete_item(&mut self, identifier: &str) -> Result<(), DataSourceError> {
    let Some(path) = self.item_paths.get(identifier) else {
      return Err(DataSourceError::NotFound {
        identifier: identifier.to_string(),
      });
    };

    self.vcs.remove(path)?;
    info!(identifier = %identifier, path = %path.display(), vcs = %self.vcs.name(), "deleted item");
    self.item_paths.remove(identifier);
    Ok(())
  }
}

fn is_hidden(entry: &DirEntry) -> bool {
  entry.file_name().to_str().is_some_and(|name| name.starts_with('.'))
}

fn is_backup(entry: &DirEntry) -> bool {
  entry.file_name().to_str().is_some_and(|name| name.ends_with('~'))
}

/// Load every file below `dir`, keyed by path. A missing directory holds no
/// entities.
fn load_dir(dir: &Path, root: &str) -> Result<BTreeMap<PathBuf, LoadedFile>, DataSourceError> {
  let mut files = BTreeMap::new();
  if !dir.is_dir() {
    debug!(dir = %dir.display(), "directory does not exist, nothing to load");
    return Ok(files);
  }

  let mut seen: BTreeMap<String, PathBuf> = BTreeMap::new();

  let walker = WalkDir::new(dir)
    .min_depth(1)
    .sort_by_file_name()
    .into_iter()
    .filter_entry(|e| !is_hidden(e));

  for entry in walker {
    let entry = entry.map_err(|source| DataSourceError::Walk {
      path: dir.to_path_buf(),
      source,
    })?;
    if !entry.file_type().is_file() || is_backup(&entry) {
      continue;
    }

    let path = entry.path();
    let Ok(relative) = path.strip_prefix(dir) else {
      continue;
    };

    let identifier = identifier_for(root, relative);
    if let Some(first) = seen.get(&identifier) {
      return Err(DataSourceError::DuplicateIdentifier {
        identifier,
        first: first.clone(),
        second: path.to_path_buf(),
      });
    }
    seen.insert(identifier.clone(), path.to_path_buf());

    let bytes = fs::read(path).map_err(|source| DataSourceError::Read {
      path: path.to_path_buf(),
      source,
    })?;

    let mut attributes = AttributeStore::new();
    attributes.set("filename", slash_path(relative));
    if let Some(extension) = relative.extension().and_then(|e| e.to_str()) {
      attributes.set("extension", extension);
    }

    let content = match String::from_utf8(bytes) {
      Ok(text) => {
        let (meta, body) = front_matter::parse(path, &text)?;
        attributes.merge_from(meta.iter().map(|(k, v)| (k.clone(), v.clone())));
        body
      }
      Err(_) => {
        attributes.set("binary", true);
        String::new()
      }
    };

    debug!(identifier = %identifier, path = %path.display(), "loaded file");
    files.insert(
      path.to_path_buf(),
      LoadedFile {
        identifier,
        content,
        attributes,
      },
    );
  }

  Ok(files)
}

fn slash_path(relative: &Path) -> String {
  relative
    .components()
    .map(|c| c.as_os_str().to_string_lossy())
    .collect::<Vec<_>>()
    .join("/")
}

fn identifier_for(root: &str, relative: &Path) -> String {
  format!("{}/{}", root.trim_end_matches('/'), slash_path(&relative.with_extension("")))
}

fn path_for(dir: &Path, root: &str, identifier: &str) -> Result<PathBuf, DataSourceError> {
  // The root only matches whole segments: `/blogpost` is not below `/blog`.
  let trimmed = root.trim_end_matches('/');
  let relative = match identifier.strip_prefix(trimmed) {
    Some("") => "",
    Some(rest) if rest.starts_with('/') => rest.trim_matches('/'),
    _ => {
      return Err(DataSourceError::OutsideRoot {
        identifier: identifier.to_string(),
        root: root.to_string(),
      });
    }
  };

  let segments: Vec<&str> = relative.split('/').filter(|s| !s.is_empty()).collect();
  if segments
    .iter()
    .any(|s| !matches!(Path::new(s).components().next(), Some(Component::Normal(_))))
  {
    return Err(DataSourceError::InvalidIdentifier {
      identifier: identifier.to_string(),
    });
  }

  let Some((last, parents)) = segments.split_last() else {
    return Ok(dir.join(format!("index.{CREATED_EXTENSION}")));
  };

  let mut path = dir.to_path_buf();
  for parent in parents {
    path.push(parent);
  }
  path.push(format!("{last}.{CREATED_EXTENSION}"));
  Ok(path)
}
