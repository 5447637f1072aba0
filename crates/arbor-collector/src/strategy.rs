use std::fmt;
use std::str::FromStr;

use crate::error::CollectorError;

/// Which part of the tree a strategy reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    /// Exactly one resource, addressed by path.
    Single,
    /// Direct children of the containing folder.
    Folder,
    /// Every resource below the containing folder.
    SubTree,
}

/// Sort key of a listing strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    RootPath,
    DateReleased,
}

/// The fixed set of listing strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    SingleFile,
    AllInFolder,
    AllInFolderDesc,
    AllInFolderDateReleased,
    AllInFolderDateReleasedDesc,
    AllInSubTree,
    AllInSubTreeDesc,
    AllInSubTreeDateReleased,
    AllInSubTreeDateReleasedDesc,
}

impl Strategy {
    /// Every strategy, in listing order.
    pub const ALL: [Strategy; 9] = [
        Self::SingleFile,
        Self::AllInFolder,
        Self::AllInFolderDesc,
        Self::AllInFolderDateReleased,
        Self::AllInFolderDateReleasedDesc,
        Self::AllInSubTree,
        Self::AllInSubTreeDesc,
        Self::AllInSubTreeDateReleased,
        Self::AllInSubTreeDateReleasedDesc,
    ];

    /// The name callers use to select this strategy.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SingleFile => "singleFile",
            Self::AllInFolder => "allInFolder",
            Self::AllInFolderDesc => "allInFolderDesc",
            Self::AllInFolderDateReleased => "allInFolderDateReleased",
            Self::AllInFolderDateReleasedDesc => "allInFolderDateReleasedDesc",
            Self::AllInSubTree => "allInSubTree",
            Self::AllInSubTreeDesc => "allInSubTreeDesc",
            Self::AllInSubTreeDateReleased => "allInSubTreeDateReleased",
            Self::AllInSubTreeDateReleasedDesc => "allInSubTreeDateReleasedDesc",
        }
    }

    pub const fn scope(&self) -> Scope {
        match self {
            Self::SingleFile => Scope::Single,
            Self::AllInFolder
            | Self::AllInFolderDesc
            | Self::AllInFolderDateReleased
            | Self::AllInFolderDateReleasedDesc => Scope::Folder,
            Self::AllInSubTree
            | Self::AllInSubTreeDesc
            | Self::AllInSubTreeDateReleased
            | Self::AllInSubTreeDateReleasedDesc => Scope::SubTree,
        }
    }

    /// The sort key, or `None` for [`Strategy::SingleFile`].
    pub const fn sort_key(&self) -> Option<SortKey> {
        match self {
            Self::SingleFile => None,
            Self::AllInFolder | Self::AllInFolderDesc | Self::AllInSubTree | Self::AllInSubTreeDesc => {
                Some(SortKey::RootPath)
            }
            _ => Some(SortKey::DateReleased),
        }
    }

    /// Descending variants reverse the ascending sort of their base strategy.
    pub const fn is_descending(&self) -> bool {
        matches!(
            self,
            Self::AllInFolderDesc
                | Self::AllInFolderDateReleasedDesc
                | Self::AllInSubTreeDesc
                | Self::AllInSubTreeDateReleasedDesc
        )
    }

    /// Only folder strategies can propose a target for a new resource.
    pub const fn supports_create(&self) -> bool {
        matches!(self.scope(), Scope::Folder)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = CollectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|strategy| strategy.name() == s)
            .ok_or_else(|| CollectorError::UnknownStrategy(s.to_string()))
    }
}

/// Names of all strategies, in listing order.
pub fn list_strategy_names() -> Vec<String> {
    Strategy::ALL.iter().map(|s| s.name().to_string()).collect()
}
