//! Static registry of SPDX license and exception identifiers.
//!
//! The registry is a bidirectional mapping between canonical SPDX
//! identifiers and their full human-readable names. It is built once on
//! first use and is immutable for the process lifetime; every query is a
//! pure lookup.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Representative subset of the SPDX license list: (identifier, full name).
const LICENSES: &[(&str, &str)] = &[
    ("0BSD", "BSD Zero Clause License"),
    ("AFL-1.1", "Academic Free License v1.1"),
    ("AFL-2.0", "Academic Free License v2.0"),
    ("AFL-3.0", "Academic Free License v3.0"),
    ("AGPL-3.0-only", "GNU Affero General Public License v3.0 only"),
    ("AGPL-3.0-or-later", "GNU Affero General Public License v3.0 or later"),
    ("Aladdin", "Aladdin Free Public License"),
    ("Apache-1.0", "Apache License 1.0"),
    ("Apache-1.1", "Apache License 1.1"),
    ("Apache-2.0", "Apache License 2.0"),
    ("Artistic-1.0", "Artistic License 1.0"),
    ("Artistic-2.0", "Artistic License 2.0"),
    ("BSD-2-Clause", "BSD 2-Clause \"Simplified\" License"),
    ("BSD-3-Clause", "BSD 3-Clause \"New\" or \"Revised\" License"),
    ("BSD-4-Clause", "BSD 4-Clause \"Original\" or \"Old\" License"),
    ("BSL-1.0", "Boost Software License 1.0"),
    ("CC-BY-3.0", "Creative Commons Attribution 3.0 Unported"),
    ("CC-BY-4.0", "Creative Commons Attribution 4.0 International"),
    ("CC-BY-SA-4.0", "Creative Commons Attribution Share Alike 4.0 International"),
    ("CC0-1.0", "Creative Commons Zero v1.0 Universal"),
    ("CDDL-1.0", "Common Development and Distribution License 1.0"),
    ("CECILL-2.1", "CeCILL Free Software License Agreement v2.1"),
    ("EPL-1.0", "Eclipse Public License 1.0"),
    ("EPL-2.0", "Eclipse Public License 2.0"),
    ("EUPL-1.2", "European Union Public License 1.2"),
    ("GFDL-1.3-only", "GNU Free Documentation License v1.3 only"),
    ("GPL-1.0-only", "GNU General Public License v1.0 only"),
    ("GPL-1.0-or-later", "GNU General Public License v1.0 or later"),
    ("GPL-2.0-only", "GNU General Public License v2.0 only"),
    ("GPL-2.0-or-later", "GNU General Public License v2.0 or later"),
    ("GPL-3.0-only", "GNU General Public License v3.0 only"),
    ("GPL-3.0-or-later", "GNU General Public License v3.0 or later"),
    ("ISC", "ISC License"),
    ("LGPL-2.0-only", "GNU Library General Public License v2 only"),
    ("LGPL-2.0-or-later", "GNU Library General Public License v2 or later"),
    ("LGPL-2.1-only", "GNU Lesser General Public License v2.1 only"),
    ("LGPL-2.1-or-later", "GNU Lesser General Public License v2.1 or later"),
    ("LGPL-3.0-only", "GNU Lesser General Public License v3.0 only"),
    ("LGPL-3.0-or-later", "GNU Lesser General Public License v3.0 or later"),
    ("MIT", "MIT License"),
    ("MIT-0", "MIT No Attribution"),
    ("MPL-1.1", "Mozilla Public License 1.1"),
    ("MPL-2.0", "Mozilla Public License 2.0"),
    ("MS-PL", "Microsoft Public License"),
    ("NCSA", "University of Illinois/NCSA Open Source License"),
    ("OFL-1.1", "SIL Open Font License 1.1"),
    ("OSL-3.0", "Open Software License 3.0"),
    ("PHP-3.01", "PHP License v3.01"),
    ("PostgreSQL", "PostgreSQL License"),
    ("Python-2.0", "Python License 2.0"),
    ("Ruby", "Ruby License"),
    ("Unlicense", "The Unlicense"),
    ("UPL-1.0", "Universal Permissive License v1.0"),
    ("Vim", "Vim License"),
    ("W3C", "W3C Software Notice and License (2002-12-31)"),
    ("WTFPL", "Do What The F*ck You Want To Public License"),
    ("X11", "X11 License"),
    ("Zlib", "zlib License"),
    ("ZPL-2.1", "Zope Public License 2.1"),
];

/// SPDX license exceptions: (identifier, full name).
const EXCEPTIONS: &[(&str, &str)] = &[
    ("389-exception", "389 Directory Server Exception"),
    ("Autoconf-exception-2.0", "Autoconf exception 2.0"),
    ("Autoconf-exception-3.0", "Autoconf exception 3.0"),
    ("Bison-exception-2.2", "Bison exception 2.2"),
    ("Classpath-exception-2.0", "Classpath exception 2.0"),
    ("FLTK-exception", "FLTK exception"),
    ("GCC-exception-2.0", "GCC Runtime Library exception 2.0"),
    ("GCC-exception-3.1", "GCC Runtime Library exception 3.1"),
    ("LLVM-exception", "LLVM Exception"),
    ("Libtool-exception", "Libtool Exception"),
    ("Linux-syscall-note", "Linux Syscall Note"),
    ("OpenSSL-exception", "OpenSSL Exception"),
    ("Qt-GPL-exception-1.0", "Qt GPL exception 1.0"),
    ("WxWindows-exception-3.1", "WxWindows Library Exception 3.1"),
];

static LICENSE_BY_ID: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| LICENSES.iter().copied().collect());

static LICENSE_BY_NAME: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| LICENSES.iter().map(|&(id, name)| (name, id)).collect());

static EXCEPTION_BY_ID: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| EXCEPTIONS.iter().copied().collect());

static EXCEPTION_BY_NAME: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| EXCEPTIONS.iter().map(|&(id, name)| (name, id)).collect());

/// Resolve a license identifier to its full name.
pub fn license_name(identifier: &str) -> Option<&'static str> {
    LICENSE_BY_ID.get(identifier).copied()
}

/// Resolve a full license name to its canonical identifier.
pub fn license_id(full_name: &str) -> Option<&'static str> {
    LICENSE_BY_NAME.get(full_name).copied()
}

/// Resolve an exception identifier to its full name.
pub fn exception_name(identifier: &str) -> Option<&'static str> {
    EXCEPTION_BY_ID.get(identifier).copied()
}

/// Resolve a full exception name to its canonical identifier.
pub fn exception_id(full_name: &str) -> Option<&'static str> {
    EXCEPTION_BY_NAME.get(full_name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_license_lookup_both_directions() {
        assert_eq!(license_name("MIT"), Some("MIT License"));
        assert_eq!(license_id("MIT License"), Some("MIT"));
        assert_eq!(license_name("Aladdin"), Some("Aladdin Free Public License"));
        assert_eq!(license_id("Aladdin Free Public License"), Some("Aladdin"));
        assert_eq!(
            license_id("BSD 4-Clause \"Original\" or \"Old\" License"),
            Some("BSD-4-Clause")
        );
        assert_eq!(license_name("NotALicense"), None);
    }

    #[test]
    fn test_exception_lookup_both_directions() {
        assert_eq!(exception_name("Linux-syscall-note"), Some("Linux Syscall Note"));
        assert_eq!(exception_id("Linux Syscall Note"), Some("Linux-syscall-note"));
        assert_eq!(
            exception_name("GCC-exception-3.1"),
            Some("GCC Runtime Library exception 3.1")
        );
        assert_eq!(
            exception_id("GCC Runtime Library exception 3.1"),
            Some("GCC-exception-3.1")
        );
    }

    #[test]
    fn test_registry_round_trips_every_entry() {
        for &(id, name) in super::LICENSES {
            assert_eq!(license_name(id), Some(name));
            assert_eq!(license_id(name), Some(id));
        }
        for &(id, name) in super::EXCEPTIONS {
            assert_eq!(exception_name(id), Some(name));
            assert_eq!(exception_id(name), Some(id));
        }
    }
}
