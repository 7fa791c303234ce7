use std::fmt;

use once_cell::sync::OnceCell;

use super::{ModalError, ModalId, OpenModal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxWidth {
    Xs,
    Sm,
    Md,
    Lg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalOptions {
    pub max_width: MaxWidth,
    /// Unmount the body as soon as the session closes. When false the last
    /// body stays mounted (hidden) until a different modal kind opens.
    pub destroy_on_close: bool,
}

/// Static registration entry for one modal kind. `V` is whatever the UI
/// layer renders; the core only needs the options and titles.
#[derive(Debug)]
pub struct ModalDescriptor<V> {
    pub id: ModalId,
    pub view: V,
    pub options: ModalOptions,
    pub default_title: &'static str,
}

/// A view resolved on first use and cached for the rest of the process.
pub struct LazyView<T: 'static> {
    loader: fn() -> T,
    resolved: OnceCell<T>,
}

impl<T> LazyView<T> {
    pub const fn new(loader: fn() -> T) -> Self {
        Self {
            loader,
            resolved: OnceCell::new(),
        }
    }

    /// The view, if something already resolved it.
    pub fn get(&self) -> Option<&T> {
        self.resolved.get()
    }

    pub fn resolve(&self) -> &T {
        self.resolved.get_or_init(self.loader)
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }
}

impl<T> fmt::Debug for LazyView<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyView")
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

/// Every [`ModalId`] mapped to exactly one descriptor.
#[derive(Debug)]
pub struct ModalRegistry<V> {
    descriptors: Vec<ModalDescriptor<V>>,
}

impl<V> ModalRegistry<V> {
    /// Build a registry, rejecting duplicate or missing registrations.
    pub fn new(
        descriptors: impl IntoIterator<Item = ModalDescriptor<V>>,
    ) -> Result<Self, ModalError> {
        let mut slots: Vec<Option<ModalDescriptor<V>>> =
            ModalId::ALL.iter().map(|_| None).collect();

        for descriptor in descriptors {
            let slot = &mut slots[descriptor.id.index()];
            if slot.is_some() {
                return Err(ModalError::DuplicateRegistration(descriptor.id));
            }
            *slot = Some(descriptor);
        }

        let descriptors = slots
            .into_iter()
            .zip(ModalId::ALL)
            .map(|(slot, id)| slot.ok_or(ModalError::Unregistered(id)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { descriptors })
    }

    pub fn lookup(&self, id: ModalId) -> &ModalDescriptor<V> {
        &self.descriptors[id.index()]
    }

    pub fn lookup_name(&self, name: &str) -> Result<&ModalDescriptor<V>, ModalError> {
        Ok(self.lookup(name.parse()?))
    }

    /// Title shown in the frame: the session's override, else the default.
    pub fn title_for<'a>(&'a self, open: &'a OpenModal) -> &'a str {
        open.title_override
            .as_deref()
            .unwrap_or(self.lookup(open.id()).default_title)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModalDescriptor<V>> {
        self.descriptors.iter()
    }
}

/// The product's modal table with a view produced per id.
pub fn standard_descriptors<V>(mut view: impl FnMut(ModalId) -> V) -> Vec<ModalDescriptor<V>> {
    ModalId::ALL
        .into_iter()
        .map(|id| {
            let (max_width, destroy_on_close, default_title) = match id {
                ModalId::DeleteArtifact => (MaxWidth::Sm, true, "Delete artifact"),
                ModalId::EditTask => (MaxWidth::Md, true, "Edit task"),
                ModalId::ProjectMembers => (MaxWidth::Lg, false, "Project members"),
                ModalId::CreateProject => (MaxWidth::Md, false, "New project"),
                ModalId::CreateArtifact => (MaxWidth::Md, false, "New artifact"),
                ModalId::LinkArtifact => (MaxWidth::Md, true, "Link artifact"),
                ModalId::InviteMember => (MaxWidth::Sm, true, "Invite member"),
                ModalId::Confirm => (MaxWidth::Xs, true, "Are you sure?"),
            };
            ModalDescriptor {
                id,
                view: view(id),
                options: ModalOptions {
                    max_width,
                    destroy_on_close,
                },
                default_title,
            }
        })
        .collect()
}
